//! Profile slice: picture and video media of the logged-in user.

use serde::{Deserialize, Serialize};

use crate::mvi::{Reducer, Slice};

use super::models::User;
use super::transition::Transition;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileState {
    pub video_id: Option<u64>,
    pub video_url: Option<String>,
    pub video_name: Option<String>,
    pub picture_url: Option<String>,
}

impl Slice for ProfileState {}

impl ProfileState {
    fn from_user(user: &User) -> Self {
        Self {
            video_id: user.video_id,
            video_url: user.video_url.clone(),
            video_name: user.video_name.clone(),
            picture_url: user.picture_url.clone(),
        }
    }
}

pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Message = Transition;

    fn reduce(state: Self::State, message: &Self::Message) -> Self::State {
        match message {
            Transition::LoggedIn { user, .. } | Transition::FetchedUser(user) => {
                ProfileState::from_user(user)
            }
            Transition::ProfilePicChanged { picture_url } => ProfileState {
                picture_url: picture_url.clone(),
                ..state
            },
            Transition::VideoChanged {
                video_id,
                video_url,
            } => ProfileState {
                video_id: *video_id,
                video_url: video_url.clone(),
                ..state
            },
            Transition::VideoNameChanged { video_name } => ProfileState {
                video_name: video_name.clone(),
                ..state
            },
            Transition::InvalidSession | Transition::LogOut => ProfileState::default(),
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ProfileState {
        ProfileState {
            video_id: Some(3),
            video_url: Some("data:video".into()),
            video_name: Some("drive.mp4".into()),
            picture_url: Some("data:image".into()),
        }
    }

    #[test]
    fn fetched_user_fills_media_fields() {
        let user = User {
            video_id: Some(8),
            video_name: Some("clip".into()),
            picture_url: Some("pic".into()),
            ..User::default()
        };
        let next = ProfileReducer::reduce(ProfileState::default(), &Transition::FetchedUser(user));
        assert_eq!(next.video_id, Some(8));
        assert_eq!(next.video_name.as_deref(), Some("clip"));
        assert_eq!(next.picture_url.as_deref(), Some("pic"));
    }

    #[test]
    fn video_changed_keeps_name() {
        let next = ProfileReducer::reduce(
            populated(),
            &Transition::VideoChanged {
                video_id: Some(4),
                video_url: Some("data:new".into()),
            },
        );
        assert_eq!(next.video_id, Some(4));
        assert_eq!(next.video_url.as_deref(), Some("data:new"));
        assert_eq!(next.video_name.as_deref(), Some("drive.mp4"));
    }

    #[test]
    fn session_end_resets_profile() {
        assert_eq!(
            ProfileReducer::reduce(populated(), &Transition::InvalidSession),
            ProfileState::default()
        );
        assert_eq!(
            ProfileReducer::reduce(populated(), &Transition::LogOut),
            ProfileState::default()
        );
    }
}
