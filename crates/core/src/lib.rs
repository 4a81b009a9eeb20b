pub mod config;
pub mod domain;
pub mod errors;
pub mod recommendation;

pub use domain::product::{Product, ProductCategory, ProductId};
pub use domain::weather::{Temperature, WeatherDescriptor, WeatherSummary};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use recommendation::{
    classify, decode_weather_query, normalize, Classification, DateInput, DateKeyword, DayOffset,
    WeatherQuery,
};
