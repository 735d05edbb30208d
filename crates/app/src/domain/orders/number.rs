//! Order numbers

use crate::domain::orders::models::OrderUuid;

/// Derives the six-digit display number of an order from its id.
///
/// Takes the first eight hex digits of the id and maps them into
/// `100000..=999999`.
pub fn order_number(uuid: OrderUuid) -> u32 {
    let [a, b, c, d, ..] = *uuid.as_uuid().as_bytes();

    u32::from_be_bytes([a, b, c, d]) % 900_000 + 100_000
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn number_comes_from_the_leading_hex_digits() -> TestResult {
        let uuid: OrderUuid = "0000ffff-0000-7000-8000-000000000000".parse()?;

        assert_eq!(order_number(uuid), 165_535);

        let uuid: OrderUuid = "ffffffff-1234-7000-8000-000000000000".parse()?;

        assert_eq!(order_number(uuid), 4_294_967_295 % 900_000 + 100_000);

        Ok(())
    }

    #[test]
    fn numbers_always_have_six_digits() {
        for _ in 0..1_000 {
            let number = order_number(OrderUuid::new());

            assert!((100_000..=999_999).contains(&number), "{number}");
        }
    }
}
