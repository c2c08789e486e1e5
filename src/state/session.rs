//! Session/user slice.

use serde::{Deserialize, Serialize};

use crate::api::AccessToken;
use crate::mvi::{Reducer, Slice};

use super::models::User;
use super::transition::Transition;

/// Who is logged in, with which token, and whether a request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Busy indicator for the presentation layer. Never persisted.
    #[serde(skip)]
    pub fetching_data: bool,
    pub is_logged_in: bool,
    pub access_token: Option<AccessToken>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
    pub role: Option<String>,
    /// Reason given by the backend when login was soft-blocked.
    pub message: Option<String>,
    pub available_credit: f64,
}

impl Slice for SessionState {}

impl SessionState {
    /// Token to use for authenticated calls, if logged in.
    pub fn token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref().filter(|_| self.is_logged_in)
    }

    fn with_user(mut self, user: &User) -> Self {
        self.id = user.id;
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.number = user.number.clone();
        self.role = user.role.clone();
        if let Some(credit) = user.available_credit {
            self.available_credit = credit;
        }
        self
    }
}

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Message = Transition;

    fn reduce(state: Self::State, message: &Self::Message) -> Self::State {
        match message {
            Transition::FetchingData => SessionState {
                fetching_data: true,
                ..state
            },
            Transition::FetchedData { .. } => SessionState {
                fetching_data: false,
                ..state
            },
            Transition::LoggedIn { token, user } => SessionState {
                fetching_data: false,
                is_logged_in: true,
                access_token: Some(token.clone()),
                ..state
            }
            .with_user(user),
            Transition::UnlockUserRedirect { email, message } => SessionState {
                fetching_data: false,
                email: Some(email.clone()),
                message: message.clone(),
                ..state
            },
            Transition::FetchedUser(user) => state.with_user(user),
            Transition::InvalidSession | Transition::LogOut => SessionState::default(),
            Transition::BalanceChanged { available_credit } => SessionState {
                available_credit: *available_credit,
                ..state
            },
            Transition::PhoneNumberVerified { number } => SessionState {
                number: Some(number.clone()),
                ..state
            },
            _ => state,
        }
    }
}
