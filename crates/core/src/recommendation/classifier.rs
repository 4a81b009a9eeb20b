use crate::domain::product::ProductCategory;
use crate::domain::weather::{Temperature, WeatherDescriptor};

pub const COLD_BELOW_CELSIUS: f64 = 10.0;
pub const HOT_ABOVE_CELSIUS: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub category: ProductCategory,
    pub descriptor: WeatherDescriptor,
}

/// Buckets a temperature: below 10 is cold, 10 through 20 is mild, above 20 is hot.
pub fn classify(temperature: Temperature) -> Classification {
    let celsius = temperature.as_celsius();

    if celsius < COLD_BELOW_CELSIUS {
        Classification { category: ProductCategory::Cold, descriptor: WeatherDescriptor::Cold }
    } else if celsius <= HOT_ABOVE_CELSIUS {
        Classification { category: ProductCategory::Mild, descriptor: WeatherDescriptor::Warm }
    } else {
        Classification { category: ProductCategory::Hot, descriptor: WeatherDescriptor::Hot }
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Classification};
    use crate::domain::product::ProductCategory;
    use crate::domain::weather::{Temperature, WeatherDescriptor};

    fn at(celsius: f64) -> Classification {
        classify(Temperature::celsius(celsius))
    }

    #[test]
    fn below_ten_is_cold() {
        for celsius in [-30.0, 0.0, 9.9999] {
            let result = at(celsius);
            assert_eq!(result.category, ProductCategory::Cold, "{celsius}");
            assert_eq!(result.descriptor, WeatherDescriptor::Cold, "{celsius}");
        }
    }

    #[test]
    fn ten_through_twenty_is_mild_and_warm() {
        for celsius in [10.0, 10.0001, 15.0, 20.0] {
            let result = at(celsius);
            assert_eq!(result.category, ProductCategory::Mild, "{celsius}");
            assert_eq!(result.descriptor, WeatherDescriptor::Warm, "{celsius}");
        }
    }

    #[test]
    fn above_twenty_is_hot() {
        for celsius in [20.0001, 25.0, 45.0] {
            let result = at(celsius);
            assert_eq!(result.category, ProductCategory::Hot, "{celsius}");
            assert_eq!(result.descriptor, WeatherDescriptor::Hot, "{celsius}");
        }
    }

    #[test]
    fn classification_is_stable_across_calls() {
        assert_eq!(at(18.5), at(18.5));
    }
}
