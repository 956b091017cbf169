//! Test macros for common testing patterns

/// Macro to assert an error contains a specific substring
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $expected:expr) => {{
        match $result {
            Ok(_) => panic!("Expected error containing '{}', but got Ok", $expected),
            Err(e) => {
                let error_str = format!("{}", e);
                if !error_str.contains($expected) {
                    panic!("Expected error to contain '{}', but got '{}'", $expected, error_str);
                }
            }
        }
    }};
}

/// Macro to assert a call failed inside the library with the given error code
///
/// Works with any error type exposing `code() -> Option<i32>`.
#[macro_export]
macro_rules! assert_foreign_error {
    ($result:expr, $code:expr) => {{
        match $result {
            Ok(_) => panic!("Expected library error {}, but got Ok", $code),
            Err(e) => {
                if e.code() != Some($code) {
                    panic!("Expected library error {}, but got '{}'", $code, e);
                }
            }
        }
    }};
}

/// Macro to run a block and then check the fake library holds no leaked allocations
#[macro_export]
macro_rules! assert_no_leaks {
    ($abi:expr, $block:block) => {{
        let result = $block;
        $abi.assert_no_leaks();
        result
    }};
}

#[cfg(test)]
mod tests {
    use std::fmt;

    #[derive(Debug)]
    struct CodedError(i32);

    impl CodedError {
        fn code(&self) -> Option<i32> {
            Some(self.0)
        }
    }

    impl fmt::Display for CodedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error code {}", self.0)
        }
    }

    #[test]
    fn test_error_contains_macro() {
        let result: Result<(), String> = Err("This is an error message".to_string());
        assert_error_contains!(result, "error message");
    }

    #[test]
    #[should_panic(expected = "Expected error")]
    fn test_error_contains_macro_with_ok() {
        let result: Result<i32, String> = Ok(42);
        assert_error_contains!(result, "anything");
    }

    #[test]
    fn test_foreign_error_macro() {
        let result: Result<(), CodedError> = Err(CodedError(20));
        assert_foreign_error!(result, 20);
    }

    #[test]
    #[should_panic(expected = "Expected library error 21")]
    fn test_foreign_error_macro_wrong_code() {
        let result: Result<(), CodedError> = Err(CodedError(20));
        assert_foreign_error!(result, 21);
    }

    #[test]
    fn test_no_leaks_macro() {
        let abi = crate::fake_abi();
        let value = assert_no_leaks!(abi, { 1 + 1 });
        assert_eq!(value, 2);
    }
}
