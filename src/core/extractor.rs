use crate::core::{CardListing, FieldFormat, MalformedCardPolicy, Product};
use crate::utils::error::{card_number, EtlError, MissingField, Result};
use scraper::{ElementRef, Html, Selector};

pub const CARD_SELECTOR: &str = "article.product_pod";
const HEADING_SELECTOR: &str = "h3";
const LINK_SELECTOR: &str = "a";
const PRICE_SELECTOR: &str = "p.price_color";
const PARAGRAPH_SELECTOR: &str = "p";

struct CardSelectors {
    card: Selector,
    heading: Selector,
    link: Selector,
    price: Selector,
    paragraph: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            card: parse_selector(CARD_SELECTOR)?,
            heading: parse_selector(HEADING_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
            price: parse_selector(PRICE_SELECTOR)?,
            paragraph: parse_selector(PARAGRAPH_SELECTOR)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| EtlError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Read the raw fields of one card.
///
/// The rating keyword is the second class token of the card's first `<p>`
/// (`<p class="star-rating Three">`), whatever that paragraph is.
fn read_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
) -> std::result::Result<CardListing, MissingField> {
    let name = card
        .select(&selectors.heading)
        .next()
        .and_then(|heading| heading.select(&selectors.link).next())
        .and_then(|link| link.value().attr("title"))
        .ok_or(MissingField::Name)?;

    let price = card
        .select(&selectors.price)
        .next()
        .map(|p| p.text().map(str::trim).collect::<String>())
        .ok_or(MissingField::Price)?;

    let rating_keyword = card
        .select(&selectors.paragraph)
        .next()
        .and_then(|p| p.value().attr("class"))
        .and_then(|classes| classes.split_whitespace().nth(1))
        .ok_or(MissingField::Rating)?;

    Ok(CardListing {
        name: name.to_string(),
        price: price.trim().to_string(),
        rating_keyword: rating_keyword.to_string(),
    })
}

/// Collect the raw listings of every product card, in document order.
pub fn extract_listings(html: &str, policy: MalformedCardPolicy) -> Result<Vec<CardListing>> {
    let document = Html::parse_document(html);
    let selectors = CardSelectors::new()?;
    let mut listings = Vec::new();

    for (index, card) in document.select(&selectors.card).enumerate() {
        match read_card(card, &selectors) {
            Ok(listing) => listings.push(listing),
            Err(field) => match policy {
                MalformedCardPolicy::Abort => {
                    return Err(EtlError::MalformedCard { index, field });
                }
                MalformedCardPolicy::Skip => {
                    tracing::warn!(
                        "⚠️ Skipping product card #{}: missing {}",
                        card_number(index),
                        field
                    );
                }
            },
        }
    }

    tracing::debug!("Read {} product cards", listings.len());
    Ok(listings)
}

pub fn extract_products(
    html: &str,
    policy: MalformedCardPolicy,
    format: &FieldFormat,
) -> Result<Vec<Product>> {
    let listings = extract_listings(html, policy)?;
    Ok(listings
        .into_iter()
        .map(|listing| format.apply(listing))
        .collect())
}
