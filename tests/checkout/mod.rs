mod historical_checkout_is_read_only;
mod latest_qualifier_ignores_preview_settings;
mod numeric_qualifier_opens_historical_version;
mod unqualified_reference_follows_user_settings;
