// Tue Jan 13 2026 - Alex

pub mod logging;

pub use logging::LoggingUtils;

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "byte", "bytes"), "1 byte");
        assert_eq!(pluralize(0, "byte", "bytes"), "0 bytes");
    }
}
