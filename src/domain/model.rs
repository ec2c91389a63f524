use serde::{Deserialize, Serialize};

/// One product listing as it is written to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub rating: String,
}

/// Raw fields read from one product card before any formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardListing {
    pub name: String,
    pub price: String,
    pub rating_keyword: String,
}

/// What to do with a card whose markup lacks one of the expected pieces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MalformedCardPolicy {
    /// Fail the whole extraction on the first malformed card.
    #[default]
    Abort,
    /// Log the card and keep going with the rest of the page.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySwap {
    pub from: String,
    pub to: String,
}

/// Presentation rules applied to every extracted listing.
///
/// [`FieldFormat::legacy`] reproduces the historical output: pound signs
/// rewritten as rupee signs and two spaces of padding around every cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFormat {
    pub currency: Option<CurrencySwap>,
    pub padding: usize,
}

impl FieldFormat {
    pub fn legacy() -> Self {
        Self {
            currency: Some(CurrencySwap {
                from: "£".to_string(),
                to: "₹".to_string(),
            }),
            padding: 2,
        }
    }

    pub fn clean() -> Self {
        Self {
            currency: None,
            padding: 0,
        }
    }

    pub fn apply(&self, listing: CardListing) -> Product {
        let price = match &self.currency {
            Some(swap) => listing.price.replace(&swap.from, &swap.to),
            None => listing.price,
        };

        Product {
            name: self.pad(&listing.name),
            price: self.pad(price.trim()),
            rating: self.pad(&format!("{} stars", listing.rating_keyword)),
        }
    }

    fn pad(&self, value: &str) -> String {
        let spaces = " ".repeat(self.padding);
        format!("{spaces}{value}{spaces}")
    }
}

impl Default for FieldFormat {
    fn default() -> Self {
        Self::legacy()
    }
}
