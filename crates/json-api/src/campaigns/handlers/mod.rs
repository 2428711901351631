//! Campaign Handlers

pub(crate) mod clear;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod upsert;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::campaigns::models::Campaign;

    use crate::test_helpers::make_terms;

    pub(super) fn make_campaign(name: &str, categories: &[&str]) -> Campaign {
        Campaign {
            name: name.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
            terms: make_terms(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
