//! Form validation rules.
//!
//! Field-level rules for the student entry form and the admin login form,
//! with the human-readable messages the forms have always shown. Validation
//! failures block submission and go no further than the form.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, Result};
use crate::guard::LoginForm;
use crate::student::StudentRecord;

/// Pattern for name fields: letters, spaces, hyphens, apostrophes.
const NAME_PATTERN: &str = r"^[A-Za-z\s'-]+$";

/// Pattern for the middle initial field: one to three letters.
const MIDDLE_INITIAL_PATTERN: &str = r"^[A-Za-z]{1,3}$";

/// Minimum accepted age.
const MIN_AGE: u32 = 17;

/// Maximum accepted age.
const MAX_AGE: u32 = 100;

/// Compiled validation rules for the student entry form.
#[derive(Debug)]
pub struct StudentRules {
    name_pattern: Regex,
    middle_initial_pattern: Regex,
}

impl Default for StudentRules {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentRules {
    /// Compile the rule patterns.
    ///
    /// # Panics
    ///
    /// Panics if a built-in regex pattern is invalid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name_pattern: Regex::new(NAME_PATTERN).expect("Invalid name pattern"),
            middle_initial_pattern: Regex::new(MIDDLE_INITIAL_PATTERN)
                .expect("Invalid middle initial pattern"),
        }
    }

    /// Validate the first name field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_first_name(&self, value: &str) -> Result<()> {
        self.validate_name("first name", value)
    }

    /// Validate the last name field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_last_name(&self, value: &str) -> Result<()> {
        self.validate_name("last name", value)
    }

    fn validate_name(&self, field: &'static str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::validation(field, format!("Please input {field}")));
        }
        if value.chars().count() < 2 || value.chars().count() > 50 {
            return Err(Error::validation(
                field,
                "Length should be 2 to 50 characters",
            ));
        }
        if !self.name_pattern.is_match(value) {
            return Err(Error::validation(field, "Numbers are invalid name inputs"));
        }
        Ok(())
    }

    /// Validate the middle initial field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_middle_initial(&self, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::validation("middle initial", "Ex. T. IG"));
        }
        if !self.middle_initial_pattern.is_match(value) {
            return Err(Error::validation(
                "middle initial",
                "Must be 1 to 3 letters",
            ));
        }
        Ok(())
    }

    /// Validate the birthday field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_birth_day(&self, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::validation("birthday", "Please select birthday"));
        }
        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            return Err(Error::validation(
                "birthday",
                "Birthday must be a YYYY-MM-DD date",
            ));
        }
        Ok(())
    }

    /// Validate the age field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_age(&self, value: u32) -> Result<()> {
        if value == 0 {
            return Err(Error::validation("age", "Age is required"));
        }
        if value < MIN_AGE {
            return Err(Error::validation("age", "Minimum age is 17"));
        }
        if value > MAX_AGE {
            return Err(Error::validation("age", "Invalid Age"));
        }
        Ok(())
    }

    /// Validate the address field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_address(&self, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::validation("address", "Please input address"));
        }
        if value.chars().count() < 10 {
            return Err(Error::validation(
                "address",
                "Address should be at least 10 characters",
            ));
        }
        Ok(())
    }

    /// Validate the course selection.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the rule that failed.
    pub fn validate_courses(&self, courses: &[String]) -> Result<()> {
        if courses.is_empty() {
            return Err(Error::validation(
                "courses",
                "Please select at least one course",
            ));
        }
        Ok(())
    }

    /// Validate a whole record, stopping at the first failing field.
    ///
    /// # Errors
    ///
    /// Returns the first field validation error, in form order.
    pub fn validate(&self, record: &StudentRecord) -> Result<()> {
        self.validate_first_name(&record.first_name)?;
        self.validate_middle_initial(&record.middle_initial)?;
        self.validate_last_name(&record.last_name)?;
        self.validate_birth_day(&record.birth_day)?;
        self.validate_age(record.age)?;
        self.validate_address(&record.address)?;
        self.validate_courses(&record.courses)?;
        Ok(())
    }

    /// Collect every field violation in a record, in form order.
    #[must_use]
    pub fn violations(&self, record: &StudentRecord) -> Vec<Error> {
        [
            self.validate_first_name(&record.first_name),
            self.validate_middle_initial(&record.middle_initial),
            self.validate_last_name(&record.last_name),
            self.validate_birth_day(&record.birth_day),
            self.validate_age(record.age),
            self.validate_address(&record.address),
            self.validate_courses(&record.courses),
        ]
        .into_iter()
        .filter_map(std::result::Result::err)
        .collect()
    }
}

/// Validate the admin login form: both fields are required.
///
/// # Errors
///
/// Returns a validation error naming the missing field.
pub fn validate_login_form(form: &LoginForm) -> Result<()> {
    if form.username.is_empty() {
        return Err(Error::validation("username", "Please input username"));
    }
    if form.password.is_empty() {
        return Err(Error::validation("password", "Please input password"));
    }
    Ok(())
}
