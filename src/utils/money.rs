use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents and pin the scale at 2 so values print as "50.00"
pub fn normalize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
