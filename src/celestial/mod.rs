mod advisor;
mod band;
mod locale_table;
mod orion;
mod sun;

pub use advisor::{CelestialAdvisor, CelestialGuidance, ReferenceBody};
pub use band::Band;
pub use locale_table::{LocaleTable, LocaleTableError, Messages};
