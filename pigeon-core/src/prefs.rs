//! Theme and premium flags.
//!
//! Both live in the store as raw strings rather than JSON: the theme flag
//! is "1" or "0", the premium flag is "1" when present and absent otherwise.

use tracing::info;

use crate::error::Result;
use crate::store::{KeyValueStore, keys};

pub const UPGRADED_MESSAGE: &str = "You are now Premium! Thanks for supporting Pigeon Budget.";
pub const CANCELLED_MESSAGE: &str = "You have cancelled Premium. You can re-upgrade anytime.";

pub fn is_dark<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    matches!(store.get(keys::DARK), Ok(Some(v)) if v.trim() == "1")
}

/// Flip the theme flag and persist it, returning the new state.
pub fn toggle_dark<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<bool> {
    let dark = !is_dark(store);
    store.set(keys::DARK, if dark { "1" } else { "0" })?;
    Ok(dark)
}

pub fn is_premium<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    matches!(store.get(keys::PREMIUM), Ok(Some(v)) if v.trim() == "1")
}

/// Simulated subscription: no payment, just the flag.
pub fn upgrade<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<&'static str> {
    store.set(keys::PREMIUM, "1")?;
    info!("premium enabled");
    Ok(UPGRADED_MESSAGE)
}

pub fn cancel<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<&'static str> {
    store.remove(keys::PREMIUM)?;
    info!("premium cancelled");
    Ok(CANCELLED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_theme_toggle_persists() {
        let mut store = MemoryStore::new();
        assert!(!is_dark(&store));
        assert!(toggle_dark(&mut store).unwrap());
        assert_eq!(store.get(keys::DARK).unwrap().as_deref(), Some("1"));
        assert!(!toggle_dark(&mut store).unwrap());
        assert_eq!(store.get(keys::DARK).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_premium_flag_present_or_absent() {
        let mut store = MemoryStore::new();
        assert!(!is_premium(&store));
        assert_eq!(upgrade(&mut store).unwrap(), UPGRADED_MESSAGE);
        assert!(is_premium(&store));
        cancel(&mut store).unwrap();
        assert!(!is_premium(&store));
        assert_eq!(store.get(keys::PREMIUM).unwrap(), None);
    }
}
