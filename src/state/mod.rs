//! Application state: five independent slices and the messages that
//! change them.
//!
//! Each slice is owned by its reducer. No reducer reads a sibling slice;
//! the only cross-cutting behavior is the session reset, which clears the
//! session and profile slices and deliberately leaves vehicle, shop and
//! community data in place.

mod community;
mod models;
mod profile;
mod session;
mod shop;
mod transition;
mod vehicle;

pub use community::{CommunityReducer, CommunityState};
pub use models::{
    Extra, Mechanic, Offset, Order, PageCursor, Post, Product, Upload, User, Vehicle,
};
pub use profile::{ProfileReducer, ProfileState};
pub use session::{SessionReducer, SessionState};
pub use shop::{ShopReducer, ShopState};
pub use transition::Transition;
pub use vehicle::{VehicleReducer, VehicleState};

use crate::mvi::Reducer;

/// Snapshot of every slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub session: SessionState,
    pub vehicle: VehicleState,
    pub shop: ShopState,
    pub community: CommunityState,
    pub profile: ProfileState,
}

impl AppState {
    /// Fold one transition through every slice reducer.
    pub fn reduce(self, transition: &Transition) -> Self {
        Self {
            session: SessionReducer::reduce(self.session, transition),
            vehicle: VehicleReducer::reduce(self.vehicle, transition),
            shop: ShopReducer::reduce(self.shop, transition),
            community: CommunityReducer::reduce(self.community, transition),
            profile: ProfileReducer::reduce(self.profile, transition),
        }
    }
}

/// Replace every entry matching `matches` with `replace(entry)`, keeping
/// the rest of the list and its order intact.
pub(crate) fn replace_where<T>(
    items: Vec<T>,
    matches: impl Fn(&T) -> bool,
    mut replace: impl FnMut(T) -> T,
) -> Vec<T> {
    items
        .into_iter()
        .map(|item| if matches(&item) { replace(item) } else { item })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AccessToken;

    #[test]
    fn replace_where_preserves_order() {
        let out = replace_where(vec![1, 2, 3, 2], |n| *n == 2, |n| n * 10);
        assert_eq!(out, vec![1, 20, 3, 20]);
    }

    #[test]
    fn invalid_session_resets_only_session_and_profile() {
        let mut state = AppState::default().reduce(&Transition::LoggedIn {
            token: AccessToken::new("t"),
            user: User {
                picture_url: Some("pic".into()),
                ..User::default()
            },
        });
        state = state.reduce(&Transition::BalanceChanged {
            available_credit: 10.0,
        });
        let before = state.clone();

        let after = state.reduce(&Transition::InvalidSession);
        assert_eq!(after.session, SessionState::default());
        assert_eq!(after.profile, ProfileState::default());
        assert_eq!(after.shop, before.shop);
        assert_eq!(after.vehicle, before.vehicle);
        assert_eq!(after.community, before.community);
    }
}
