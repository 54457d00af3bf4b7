use regex::Regex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArrayId(String);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayIdError {
    #[error("{0} is not a valid array id")]
    Match(String),
    #[error("Array id regex error")]
    Regex(#[from] regex::Error),
}

impl ArrayId {
    const PATTERN: &'static str = r"^[0-9]{12}$";

    /// # Errors
    ///
    /// Will fail if `raw` is not exactly twelve decimal digits, the form
    /// every Symmetrix serial takes, e.g. "000197800123".
    pub fn new(raw: &str) -> Result<Self, ArrayIdError> {
        let re = Regex::new(Self::PATTERN)?;

        if re.is_match(raw) {
            Ok(Self(raw.into()))
        } else {
            Err(ArrayIdError::Match(raw.to_string()))
        }
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArrayId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_array_id() {
        assert!(ArrayId::new("000197800123").is_ok());
    }

    #[test]
    fn test_valid_array_id_all_zeros() {
        assert!(ArrayId::new("000000000000").is_ok());
    }

    #[test]
    fn test_invalid_array_id_too_short() {
        assert!(ArrayId::new("00019780012").is_err());
    }

    #[test]
    fn test_invalid_array_id_too_long() {
        assert!(ArrayId::new("0001978001234").is_err());
    }

    #[test]
    fn test_invalid_array_id_non_numeric() {
        let result = ArrayId::new("00019780012F");
        match result.unwrap_err() {
            ArrayIdError::Match(id) => assert_eq!(id, "00019780012F"),
            ArrayIdError::Regex(_) => panic!("Expected Match error"),
        }
    }

    #[test]
    fn test_empty_array_id() {
        assert!(ArrayId::new("").is_err());
    }

    #[test]
    fn test_array_id_display() {
        let array_id = ArrayId::new("000197800123").unwrap();
        assert_eq!(format!("{array_id}"), "000197800123");
    }

    #[test]
    fn test_array_id_as_ref_str() {
        let array_id = ArrayId::new("000197800123").unwrap();
        let as_str: &str = array_id.as_ref();
        assert_eq!(as_str, "000197800123");
    }

    #[test]
    fn test_array_id_error_display() {
        let error = ArrayIdError::Match("bogus".to_string());
        assert_eq!(format!("{error}"), "bogus is not a valid array id");
    }
}
