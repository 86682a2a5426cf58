pub mod index;
pub mod interval;
pub mod locator;
pub mod period;
pub mod plan;
pub mod resolver;
pub mod season;
pub mod source;
pub mod table;
