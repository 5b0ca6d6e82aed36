use regex::Regex;
use std::collections::VecDeque;
use std::error::Error;
use std::fs;
use std::process::{self, Command};

const SCANLOX_PATH: &str = "./target/debug/scanlox";
const TEST_DIR: &str = "./test";

/// Collect the captured text of every line in `contents` matching `pattern`.
fn expectations<'a>(pattern: &Regex, contents: &'a str) -> VecDeque<&'a str> {
    contents
        .lines()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().trim_end())
        .collect()
}

/// Compare produced lines against expectations in order, returning failure descriptions.
fn compare(mut expected: VecDeque<&str>, actual: &str) -> Vec<String> {
    let mut failures = Vec::new();
    for line in actual.lines() {
        let line = line.trim_end();
        match expected.pop_front() {
            Some(want) if want == line => {}
            Some(want) => failures.push(format!("Expected: {}, Actual: {}", want, line)),
            None => failures.push(format!("Unexpected output: {}", line)),
        }
    }
    for missed in expected {
        failures.push(format!("Expected, not found: {}", missed));
    }
    failures
}

fn main() -> Result<(), Box<dyn Error>> {
    let expect_regex = Regex::new("// expect: (.*)")?;
    let error_regex = Regex::new("// error: (.*)")?;
    let mut all_passing = true;

    let mut test_files = fs::read_dir(TEST_DIR)?.collect::<Result<Vec<_>, _>>()?;
    test_files.sort_by_key(|entry| entry.file_name());

    for test_file in test_files {
        let test_name = test_file.file_name().to_string_lossy().into_owned();
        print!("Running test: {} ... ", test_name);
        let contents = fs::read_to_string(test_file.path())?;

        let output = Command::new(SCANLOX_PATH).arg(test_file.path()).output()?;
        let expected_errors = expectations(&error_regex, &contents);
        let expected_status = if expected_errors.is_empty() { 0 } else { 65 };

        let mut failures = compare(
            expectations(&expect_regex, &contents),
            &String::from_utf8_lossy(&output.stdout),
        );
        failures.extend(compare(
            expected_errors,
            &String::from_utf8_lossy(&output.stderr),
        ));
        if output.status.code() != Some(expected_status) {
            failures.push(format!(
                "Expected exit status {}, got {:?}",
                expected_status,
                output.status.code()
            ));
        }

        if failures.is_empty() {
            println!("pass!");
        } else {
            all_passing = false;
            println!("\x1b[0;31mfail!\x1b[0m");
            for failure in failures {
                println!("{}", failure);
            }
        }
    }

    if !all_passing {
        process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_compare() {
        let pattern = Regex::new("// expect: (.*)").unwrap();
        let contents = "1; // expect: NUMBER 1 1\n// expect: SEMICOLON ; \n";
        let expected = expectations(&pattern, contents);
        assert_eq!(expected, vec!["NUMBER 1 1", "SEMICOLON ;"]);

        assert!(compare(expected.clone(), "NUMBER 1 1\nSEMICOLON ; \n").is_empty());
        assert_eq!(compare(expected, "NUMBER 1 1\n").len(), 1);
    }
}
