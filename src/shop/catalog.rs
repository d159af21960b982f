//! The shop-catalog flow.

use crate::api::{ApiError, ShopGateway};
use crate::model::{ShopCatalog, UserProfile};
use tracing::instrument;

/// Fetch the three catalog feeds concurrently and combine them.
///
/// Fail-fast join semantics: the first fetch to fail aborts the combined
/// wait and the error is returned as-is. The card catalog is scoped to
/// the user's incentive level only when the profile syncs purchases.
#[instrument(skip(shop, profile))]
pub async fn fetch_catalog(
    shop: &dyn ShopGateway,
    country: &str,
    profile: Option<&UserProfile>,
) -> Result<ShopCatalog, ApiError> {
    let incentive_level_id = profile
        .filter(|p| p.syncs_gift_card_purchases())
        .and_then(|p| p.incentive_level_id.as_deref());

    let (available_card_map, categories_and_curations, integrations) = tokio::try_join!(
        shop.fetch_available_cards(country, incentive_level_id),
        shop.fetch_directory(),
        shop.fetch_integrations(),
    )?;

    Ok(ShopCatalog {
        available_card_map,
        categories_and_curations,
        integrations,
    })
}
