//! # Validation Module
//!
//! Input validation for sale and payment requests.
//!
//! Validation runs before any business logic and long before any write; a
//! request that fails here must leave the ledger store untouched. The
//! database adds its own NOT NULL / UNIQUE / foreign-key layer underneath.

use crate::error::ValidationError;
use crate::formula::LineInput;
use crate::money::Money;
use crate::policy::{AmountBasis, ChannelPolicy, NetWeightSource};
use crate::types::PaymentEvent;
use crate::weight::Weight;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted description / name.
const MAX_TEXT: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a customer name: non-empty after trimming, bounded length.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name)
}

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_TEXT {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT,
        });
    }

    Ok(())
}

fn require_positive_weight(field: &str, weight: Weight) -> ValidationResult<()> {
    if !weight.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn require_positive_money(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Line Inputs
// =============================================================================

/// Validates one voucher line against the channel's expectations.
///
/// ## Rules
/// - description present and bounded
/// - pieces at least 1
/// - gross weight positive, stone weight non-negative and below gross
/// - net weight required (and positive) on supplied-net channels
/// - touch at most 100%
/// - labor rate non-negative
pub fn validate_line_input(input: &LineInput, policy: &ChannelPolicy) -> ValidationResult<()> {
    validate_text("description", &input.description)?;

    if input.pieces() < 1 {
        return Err(ValidationError::MustBePositive {
            field: "pieces".to_string(),
        });
    }

    require_positive_weight("gross_weight", input.gross_weight)?;

    let stone = input.stone_weight();
    if stone.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "stone_weight".to_string(),
        });
    }
    if stone > input.gross_weight {
        return Err(ValidationError::StoneExceedsGross {
            gross: input.gross_weight.to_string(),
            stone: stone.to_string(),
        });
    }

    match policy.net_weight_source {
        NetWeightSource::Supplied => match input.net_weight {
            None => {
                return Err(ValidationError::Required {
                    field: "net_weight".to_string(),
                })
            }
            Some(net) => require_positive_weight("net_weight", net)?,
        },
        NetWeightSource::GrossMinusStone => {
            // gross > stone already guarantees a positive derived net
            if stone == input.gross_weight {
                return Err(ValidationError::MustBePositive {
                    field: "net_weight".to_string(),
                });
            }
        }
    }

    if input.touch.bps() > 10_000 {
        return Err(ValidationError::TouchAboveFine {
            bps: input.touch.bps(),
        });
    }

    if input.labor_rate_per_kg.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "labor_rate_per_kg".to_string(),
        });
    }

    Ok(())
}

/// Validates the silver rate for a sale on the given channel.
///
/// Channels that bill the full item amount need a positive rate; labor-only
/// channels never consume it.
pub fn validate_silver_rate(rate: Money, policy: &ChannelPolicy) -> ValidationResult<()> {
    match policy.amount_basis {
        AmountBasis::ItemAmount => require_positive_money("silver_rate", rate),
        AmountBasis::LaborOnly => Ok(()),
    }
}

// =============================================================================
// Payment Events
// =============================================================================

/// Validates a payment event: every magnitude strictly positive.
pub fn validate_payment_event(event: &PaymentEvent) -> ValidationResult<()> {
    match event {
        PaymentEvent::Cash { amount } => require_positive_money("amount", *amount),
        PaymentEvent::Silver { weight } => require_positive_weight("weight", *weight),
        PaymentEvent::CashForSilver { weight, rate } => {
            require_positive_weight("weight", *weight)?;
            require_positive_money("rate", *rate)
        }
        PaymentEvent::SilverReturn { weight } => require_positive_weight("weight", *weight),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, Percent};

    fn valid_line() -> LineInput {
        LineInput {
            description: "kada".to_string(),
            stamp: None,
            pieces: Some(2),
            gross_weight: Weight::from_grams(150),
            stone_weight: Some(Weight::from_grams(3)),
            net_weight: Some(Weight::from_grams(147)),
            wastage: Percent::from_percent(2),
            touch: Percent::from_percent(92),
            labor_rate_per_kg: Money::from_rupees(500),
            product_id: None,
        }
    }

    #[test]
    fn test_valid_line_passes_both_sources() {
        assert!(validate_line_input(&valid_line(), Channel::Wholesale.policy()).is_ok());
        assert!(validate_line_input(&valid_line(), Channel::Regular.policy()).is_ok());
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut line = valid_line();
        line.description = "   ".to_string();
        assert!(matches!(
            validate_line_input(&line, Channel::Regular.policy()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_non_positive_gross_rejected() {
        let mut line = valid_line();
        line.gross_weight = Weight::zero();
        line.stone_weight = None;
        assert!(matches!(
            validate_line_input(&line, Channel::Regular.policy()),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_stone_exceeding_gross_rejected() {
        let mut line = valid_line();
        line.stone_weight = Some(Weight::from_grams(151));
        assert!(matches!(
            validate_line_input(&line, Channel::Regular.policy()),
            Err(ValidationError::StoneExceedsGross { .. })
        ));
    }

    #[test]
    fn test_supplied_net_required_on_wholesale() {
        let mut line = valid_line();
        line.net_weight = None;
        assert!(validate_line_input(&line, Channel::Wholesale.policy()).is_err());
        // Regular derives it instead
        assert!(validate_line_input(&line, Channel::Regular.policy()).is_ok());
    }

    #[test]
    fn test_touch_above_100_percent_rejected() {
        let mut line = valid_line();
        line.touch = Percent::from_bps(10_001);
        assert!(matches!(
            validate_line_input(&line, Channel::Regular.policy()),
            Err(ValidationError::TouchAboveFine { .. })
        ));
    }

    #[test]
    fn test_silver_rate_by_amount_basis() {
        assert!(validate_silver_rate(Money::zero(), Channel::Wholesale.policy()).is_err());
        assert!(validate_silver_rate(Money::from_rupees(100), Channel::Wholesale.policy()).is_ok());
        // Labor-only channel ignores the rate entirely
        assert!(validate_silver_rate(Money::zero(), Channel::Regular.policy()).is_ok());
    }

    #[test]
    fn test_payment_events_must_be_positive() {
        assert!(validate_payment_event(&PaymentEvent::Cash {
            amount: Money::zero()
        })
        .is_err());
        assert!(validate_payment_event(&PaymentEvent::Silver {
            weight: Weight::from_milligrams(-1)
        })
        .is_err());
        assert!(validate_payment_event(&PaymentEvent::CashForSilver {
            weight: Weight::from_grams(10),
            rate: Money::zero()
        })
        .is_err());
        assert!(validate_payment_event(&PaymentEvent::CashForSilver {
            weight: Weight::from_grams(10),
            rate: Money::from_rupees(95)
        })
        .is_ok());
    }
}
