use std::time::Duration;

use serde_json::json;

use crate::util::TestProgram;

spawn_test!(
    sigterm_exits_cleanly,
    json!({}),
    |mut program: TestProgram| {
        program.send("before");
        assert_eq!(
            program.next_line().as_deref(),
            Some(r#"[[{"full_text":"before","separator":false}]"#)
        );

        assert_eq!(unsafe { libc::kill(program.pid(), libc::SIGTERM) }, 0);

        assert!(program.wait(Duration::from_secs(2)).success());
        // the array is never closed
        assert_eq!(program.rest(), "");
    }
);
