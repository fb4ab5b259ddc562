use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use std::{env, fs, thread};

use serde_json::Value;
use timeout_readwrite::{TimeoutReadExt, TimeoutReader};

static UNIQUE_ID: AtomicUsize = AtomicUsize::new(0);

/// Convenience struct for running assertions on and communicating with a running instance of the program
pub struct TestProgram {
    child: Child,
    dir: PathBuf,
    stdin: Option<ChildStdin>,
    stdout: BufReader<TimeoutReader<ChildStdout>>,
    stderr: Option<ChildStderr>,
}

impl TestProgram {
    /// Spawn the program with its own test directory and config file
    pub fn run(name: impl AsRef<str>, config: Value, args: &[&str]) -> TestProgram {
        let dir = env::temp_dir().join(format!(
            "i3barjson-test-{}-{}.{}",
            name.as_ref(),
            std::process::id(),
            UNIQUE_ID.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();

        let config_file = dir.join("config.json");
        fs::write(&config_file, config.to_string()).unwrap();

        let mut child = Command::new(env!("CARGO_BIN_EXE_i3barjson"))
            // setup logs
            .env("RUST_LOG", "i3barjson=trace")
            // config
            .arg("--config")
            .arg(&config_file)
            .args(args)
            // stdio
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().unwrap();
        let stdout = BufReader::new(stdout.with_timeout(Duration::from_secs(2)));
        let stderr = child.stderr.take();

        TestProgram {
            child,
            dir,
            stdin,
            stdout,
            stderr,
        }
    }

    pub fn pid(&self) -> i32 {
        self.child.id() as i32
    }

    /// Get the next line of STDOUT as a string - blocks
    pub fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let count = self.stdout.read_line(&mut line).unwrap();
        if count == 0 {
            None
        } else {
            Some(line.trim_end_matches('\n').to_string())
        }
    }

    /// Parse the next status line, stripping the array delimiter in front of it
    pub fn next_line_json(&mut self) -> Value {
        match self.next_line() {
            Some(line) => {
                assert!(
                    line.starts_with('[') || line.starts_with(','),
                    "status line did not start with a delimiter: {}",
                    line
                );
                serde_json::from_str::<Value>(&line[1..]).unwrap()
            }
            None => Value::Null,
        }
    }

    /// Read STDOUT until the program closes it
    pub fn rest(&mut self) -> String {
        let mut s = String::new();
        self.stdout.read_to_string(&mut s).unwrap();
        s
    }

    /// Write a line to the program's STDIN
    pub fn send(&mut self, line: impl AsRef<str>) {
        let stdin = self.stdin.as_mut().expect("stdin was closed");
        stdin.write_all(line.as_ref().as_bytes()).unwrap();
        stdin.write_all(b"\n").unwrap();
        stdin.flush().unwrap();
    }

    pub fn close_stdin(&mut self) {
        drop(self.stdin.take());
    }

    /// Wait for the program to exit by itself
    pub fn wait(&mut self, timeout: Duration) -> ExitStatus {
        let start = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait().unwrap() {
                return status;
            }

            if start.elapsed() > timeout {
                panic!("exceeded timeout while waiting for program to exit");
            }

            thread::sleep(Duration::from_millis(20));
        }
    }

    pub fn stderr(&mut self) -> String {
        let mut s = String::new();
        if let Some(mut stderr) = self.stderr.take() {
            let _ = stderr.read_to_string(&mut s);
        }
        s
    }
}

impl Drop for TestProgram {
    fn drop(&mut self) {
        // terminate child
        let _ = self.child.kill();
        let _ = self.child.wait();

        if env::var("DEBUG").is_ok() {
            eprintln!("stderr: {:?}", self.stderr().trim());
        }

        let _ = fs::remove_dir_all(&self.dir);
    }
}
