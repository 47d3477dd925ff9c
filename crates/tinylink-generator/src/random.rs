use crate::error::GeneratorError;
use crate::Generator;
use tinylink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use tinylink_core::ShortCode;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_LENGTH: usize = 6;

/// Produces random lowercase base-36 tokens of a fixed length.
///
/// With the default length there are 36^6 (about 2.2 billion) possible codes,
/// so collisions are rare but possible; callers must still check.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator for codes of `length` characters.
    pub fn with_length(length: usize) -> Result<Self, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength {
                length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let code: String = std::iter::repeat_with(|| {
            BASE36[rand::random_range(0..BASE36.len())] as char
        })
        .take(self.length)
        .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_is_six() {
        let generator = RandomGenerator::default();
        let code = generator.generate();

        assert_eq!(code.as_str().len(), 6);
        assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn custom_length() {
        let generator = RandomGenerator::with_length(12).unwrap();
        assert_eq!(generator.generate().as_str().len(), 12);
    }

    #[test]
    fn generated_codes_are_valid_short_codes() {
        for length in [MIN_LENGTH, DEFAULT_LENGTH, MAX_LENGTH] {
            let generator = RandomGenerator::with_length(length).unwrap();
            for _ in 0..100 {
                assert!(ShortCode::is_valid(generator.generate().as_str()));
            }
        }
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert_eq!(
            RandomGenerator::with_length(3).unwrap_err(),
            GeneratorError::InvalidLength {
                length: 3,
                min: 4,
                max: 20
            }
        );
        assert!(RandomGenerator::with_length(21).is_err());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
