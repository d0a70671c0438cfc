use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::config::LotteryConfig;
use crate::lottery::sampler::{sample_with, NumberSet, SampleError};

const TICKET_ID_PREFIX: &str = "A89-223-";

/// Printed ticket identifier: a fixed prefix plus a random 4-digit serial.
/// Not unique; two tickets may share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rolls a fresh identifier. The previous id has no influence on the result.
pub fn next_id<R: Rng + ?Sized>(rng: &mut R) -> TicketId {
    let serial: u16 = rng.gen_range(1000..=9999);
    TicketId(format!("{TICKET_ID_PREFIX}{serial}"))
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub numbers: NumberSet,
    pub draw_name: String,
    pub price: f64,
    pub issued_at: DateTime<Utc>,
}

/// How many numbers to pick, and from how wide a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickRules {
    pub count: u32,
    pub max: u32,
}

impl From<&LotteryConfig> for PickRules {
    fn from(config: &LotteryConfig) -> Self {
        PickRules {
            count: config.pick_count,
            max: config.max_number,
        }
    }
}

impl Ticket {
    /// Issues a new quick-pick ticket. The id and the numbers are drawn
    /// independently of each other.
    pub fn quick_pick<R: Rng + ?Sized>(
        rng: &mut R,
        rules: PickRules,
        config: &LotteryConfig,
    ) -> Result<Self, SampleError> {
        let numbers = sample_with(rng, rules.count, rules.max)?;
        Ok(Ticket {
            id: next_id(rng),
            numbers,
            draw_name: config.draw_name.clone(),
            price: config.ticket_price,
            issued_at: Utc::now(),
        })
    }

    /// Returns a replacement ticket with a new id and a new number set.
    /// The draw name and price carry over.
    pub fn regenerate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        rules: PickRules,
    ) -> Result<Self, SampleError> {
        let numbers = sample_with(rng, rules.count, rules.max)?;
        Ok(Ticket {
            id: next_id(rng),
            numbers,
            draw_name: self.draw_name.clone(),
            price: self.price,
            issued_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ticket_id_format() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let id = next_id(&mut rng);
            let serial = id
                .as_str()
                .strip_prefix("A89-223-")
                .expect("prefix must be present");
            assert_eq!(serial.len(), 4);
            let value: u16 = serial.parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }

    #[test]
    fn test_quick_pick_uses_configured_rules() {
        let config = LotteryConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let ticket = Ticket::quick_pick(&mut rng, PickRules::from(&config), &config).unwrap();
        assert_eq!(ticket.numbers.len(), 6);
        assert!(ticket.numbers.as_slice().iter().all(|&n| n <= 49));
        assert_eq!(ticket.draw_name, "DAILY QUICK PICK");
    }

    #[test]
    fn test_quick_pick_rejects_impossible_rules() {
        let config = LotteryConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let rules = PickRules { count: 8, max: 5 };
        assert!(Ticket::quick_pick(&mut rng, rules, &config).is_err());
    }

    #[test]
    fn test_regenerate_leaves_original_untouched() {
        let config = LotteryConfig::default();
        let rules = PickRules::from(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let original = Ticket::quick_pick(&mut rng, rules, &config).unwrap();
        let snapshot = original.clone();

        let replacement = original.regenerate(&mut rng, rules).unwrap();

        assert_eq!(original.id, snapshot.id);
        assert_eq!(original.numbers, snapshot.numbers);
        assert_eq!(replacement.numbers.len(), original.numbers.len());
        assert_eq!(replacement.price, original.price);
    }
}
