//! In-memory implementation of [`EtwinClient`], for tests and offline use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use url::Url;

use etwin_core::auth::{AccessTokenAuthContext, AuthContext, AuthScope, GuestAuthContext};
use etwin_core::user::{CompleteUser, MaybeCompleteUser, UserId};

use crate::{Auth, ClientError, EtwinClient};

/// Client backed by seeded maps instead of a server.
///
/// Visibility rules match the live API: `get_user` returns the complete view
/// only when the credential resolves to the requested user or to an
/// administrator, and the public view otherwise.
///
/// Clones are cheap handles over the same state.
#[derive(Clone, Default)]
pub struct MemEtwinClient {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    users: HashMap<UserId, CompleteUser>,
    tokens: HashMap<String, AccessTokenAuthContext>,
}

impl MemEtwinClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record.
    pub fn insert_user(&self, user: CompleteUser) {
        self.state.write().users.insert(user.id, user);
    }

    /// Seed an access token resolving to the given context.
    pub fn insert_token(&self, token: impl Into<String>, context: AccessTokenAuthContext) {
        self.state.write().tokens.insert(token.into(), context);
    }

    fn not_found(segments: &[&str]) -> ClientError {
        let mut url = Url::parse("mem://etwin").unwrap_or_else(|_| unreachable!());
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        ClientError::NotFound { url }
    }
}

#[async_trait]
impl EtwinClient for MemEtwinClient {
    async fn get_self(&self, auth: &Auth) -> Result<AuthContext, ClientError> {
        match auth {
            Auth::Guest => Ok(AuthContext::Guest(GuestAuthContext {
                scope: AuthScope::Default,
            })),
            Auth::Token(token) => {
                let state = self.state.read();
                state
                    .tokens
                    .get(token)
                    .cloned()
                    .map(AuthContext::AccessToken)
                    .ok_or_else(|| Self::not_found(&["auth", "self"]))
            }
        }
    }

    async fn get_user(&self, auth: &Auth, user_id: UserId) -> Result<MaybeCompleteUser, ClientError> {
        let state = self.state.read();
        let user = state
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&["users", &user_id.to_string()]))?;

        let viewer = match auth {
            Auth::Guest => None,
            Auth::Token(token) => state.tokens.get(token).map(|ctx| ctx.user.id),
        };
        let can_see_private = match viewer {
            Some(viewer_id) if viewer_id == user_id => true,
            Some(viewer_id) => state
                .users
                .get(&viewer_id)
                .is_some_and(|viewer| viewer.is_administrator),
            None => false,
        };

        if can_see_private {
            Ok(MaybeCompleteUser::Complete(user))
        } else {
            Ok(MaybeCompleteUser::Simple(user.into()))
        }
    }
}
