use std::time::Duration;

use serde_json::json;

use crate::util::TestProgram;

spawn_test!(
    default_header,
    json!({}),
    |mut program: TestProgram| {
        // the array isn't opened until there's a status line
        program.close_stdin();
        assert!(program.wait(Duration::from_secs(2)).success());
        assert_eq!(program.rest(), "");
    }
);

spawn_test!(
    header_from_config,
    json!({ "header": { "click_events": true, "stop_signal": 10, "cont_signal": 12 } }),
    &[],
    r#"{"version":1,"stop_signal":10,"cont_signal":12,"click_events":true}"#,
    |_: TestProgram| {}
);

spawn_test!(
    header_from_cli,
    json!({}),
    &["--click-events", "--cont-signal", "18"],
    r#"{"version":1,"cont_signal":18,"click_events":true}"#,
    |_: TestProgram| {}
);

#[test]
fn invalid_config_writes_nothing() {
    let mut program = TestProgram::run(
        "invalid_config_writes_nothing",
        json!({ "header": { "stop_signal": 10, "cont_signal": 10 } }),
        &[],
    );

    assert!(!program.wait(Duration::from_secs(2)).success());
    assert_eq!(program.rest(), "");
    assert!(program
        .stderr()
        .contains("stop_signal and cont_signal must differ"));
}
