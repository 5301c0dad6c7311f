pub mod common;
pub mod domain;
pub mod irradiation;
pub mod isotope;
pub mod quantity;
pub mod spectrum;

pub use domain::{NucError, NucErrorCategory, NucResult, Quantity, QuantityUnit};
pub use irradiation::{FluenceSpec, NeutronIrradiation};
pub use isotope::{IsomerLevel, Isotope, IsotopeArg, NuclideTable};
pub use quantity::{IsotopeQuantity, QuantitySnapshot};
pub use spectrum::{AcquisitionInterval, Spectrum, TimeInterval};
