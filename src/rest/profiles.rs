//! Profiles and transfers between them.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::IgnoredAny;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;

/// Profile names the exchange keeps for itself.
pub const RESERVED_PROFILE_NAMES: [&str; 2] = ["default", "margin"];

/// A profile (portfolio) of the API key's user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Profile ID.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Whether the profile is active.
    pub active: bool,
    /// Whether this is the default profile.
    pub is_default: bool,
    /// Whether margin is enabled.
    #[serde(default)]
    pub has_margin: Option<bool>,
    /// Creation time.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single profile.
    pub async fn get_profile(
        &self,
        profile_id: &str,
        active: Option<bool>,
    ) -> Result<Profile, CoinbaseError> {
        let path = Params::new()
            .insert("active", active)
            .path_with_query(&format!("{}/{}", private::PROFILES, segment(profile_id)))?;

        self.dispatch(Method::Get, &path, None).await
    }

    /// List profiles, optionally only active or inactive ones.
    pub async fn get_profiles(&self, active: Option<bool>) -> Result<Vec<Profile>, CoinbaseError> {
        let path = Params::new()
            .insert("active", active)
            .path_with_query(private::PROFILES)?;

        self.dispatch(Method::Get, &path, None).await
    }

    /// Create a profile. Fails once the user has 10 profiles.
    pub async fn create_profile(&self, name: &str) -> Result<Profile, CoinbaseError> {
        let body = Params::new().insert("name", name).to_body();
        self.dispatch(Method::Post, private::PROFILES, Some(body))
            .await
    }

    /// Move `amount` of `currency` from one profile to another.
    pub async fn transfer_between_profiles(
        &self,
        from_profile_id: &str,
        to_profile_id: &str,
        currency: &str,
        amount: Decimal,
    ) -> Result<(), CoinbaseError> {
        let body = Params::new()
            .insert("from", from_profile_id)
            .insert("to", to_profile_id)
            .insert("currency", currency)
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .to_body();

        let _: IgnoredAny = self
            .dispatch(Method::Post, private::PROFILE_TRANSFER, Some(body))
            .await?;
        Ok(())
    }

    /// Rename a profile. The reserved names `default` and `margin` are
    /// rejected without sending a request.
    pub async fn rename_profile(&self, profile_id: &str, name: &str) -> Result<Profile, CoinbaseError> {
        if RESERVED_PROFILE_NAMES.contains(&name) {
            return Err(CoinbaseError::InvalidParameter(format!(
                "profile name {name:?} is reserved"
            )));
        }

        let body = Params::new()
            .insert("profile_id", profile_id)
            .insert("name", name)
            .to_body();
        let path = format!("{}/{}", private::PROFILES, segment(profile_id));

        self.dispatch(Method::Put, &path, Some(body)).await
    }

    /// Deactivate a profile, moving all its funds to `to_profile_id`.
    ///
    /// Fails while the profile has open orders.
    pub async fn deactivate_profile(
        &self,
        profile_id: &str,
        to_profile_id: &str,
    ) -> Result<(), CoinbaseError> {
        let body = Params::new()
            .insert("profile_id", profile_id)
            .insert("to", to_profile_id)
            .to_body();
        let path = format!("{}/{}/deactivate", private::PROFILES, segment(profile_id));

        let _: IgnoredAny = self.dispatch(Method::Put, &path, Some(body)).await?;
        Ok(())
    }
}
