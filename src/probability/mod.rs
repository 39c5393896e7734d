pub mod blend;
pub mod personal;
pub mod population;
