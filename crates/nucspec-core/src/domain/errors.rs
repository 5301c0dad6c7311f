pub type NucResult<T> = Result<T, NucError>;
pub type ParserResult<T> = NucResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NucErrorCategory {
    /// Malformed nuclide designator or isotope arguments.
    IsotopeError,
    /// Physically inconsistent request on a quantity or irradiation.
    QuantityError,
    /// A dynamically typed argument had the wrong type.
    TypeError,
    /// Numerically invalid argument (negative amount, reversed interval).
    ValueError,
    /// Unparseable timestamp, malformed data table or other bad input.
    InputError,
    IoSystemError,
}

impl NucErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsotopeError => "IsotopeError",
            Self::QuantityError => "QuantityError",
            Self::TypeError => "TypeError",
            Self::ValueError => "ValueError",
            Self::InputError => "InputError",
            Self::IoSystemError => "IoSystemError",
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::IsotopeError | Self::TypeError | Self::ValueError | Self::InputError => 2,
            Self::IoSystemError => 3,
            Self::QuantityError => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{}] {}", .category.as_str(), .placeholder, .message)]
pub struct NucError {
    category: NucErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl NucError {
    pub fn new(
        category: NucErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn isotope(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::IsotopeError, placeholder, message)
    }

    pub fn quantity(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::QuantityError, placeholder, message)
    }

    pub fn type_mismatch(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::TypeError, placeholder, message)
    }

    pub fn value(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::ValueError, placeholder, message)
    }

    pub fn input(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::InputError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(NucErrorCategory::IoSystemError, placeholder, message)
    }

    pub const fn category(&self) -> NucErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn is_isotope_error(&self) -> bool {
        self.category == NucErrorCategory::IsotopeError
    }

    pub fn is_quantity_error(&self) -> bool {
        self.category == NucErrorCategory::QuantityError
    }

    pub fn is_value_error(&self) -> bool {
        self.category == NucErrorCategory::ValueError
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}
