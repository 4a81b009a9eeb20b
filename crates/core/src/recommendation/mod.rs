pub mod classifier;
pub mod date;
pub mod request;

pub use classifier::{classify, Classification};
pub use date::{normalize, DateInput, DateKeyword, DayOffset};
pub use request::{decode_weather_query, WeatherQuery};
