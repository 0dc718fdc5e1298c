//! User lookup route.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::params::{all_values, query_pairs};
use crate::reply::{ApiResult, Reply};
use axum::extract::{RawQuery, State};
use weboffice_core::{UserInfo, UserProvider};

/// `GET` user profiles, `?user_ids=a&user_ids=b`.
pub const USERS_PATH: &str = "/v3/3rd/users";

/// State of the user route.
pub type UserState = CapabilityState<dyn UserProvider>;

pub(crate) fn routes(state: UserState) -> RouteGroup {
    RouteGroup::<UserState>::new()
        .route(RouteMethod::Get, USERS_PATH, get_users)
        .with_state(state)
}

/// Resolve the repeated `user_ids` query parameter to profiles.
pub async fn get_users(
    State(state): State<UserState>,
    RequestContext(ctx): RequestContext,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<UserInfo>> {
    let pairs = query_pairs(query.as_deref());
    let user_ids = all_values(&pairs, "user_ids");
    Ok(Reply(state.provider.get_users(&ctx, &user_ids).await?))
}
