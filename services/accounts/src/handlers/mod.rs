pub mod accounts;
pub mod assignment;

use crewdir_auth_types::principal::Principal;

use crate::domain::types::Actor;
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::provision::ResolveActorUseCase;

/// Resolve the verified principal to an acting account, provisioning a
/// record on first contact.
pub(crate) async fn resolve_actor(
    state: &AppState,
    principal: &Principal,
) -> Result<Actor, AccountsServiceError> {
    let usecase = ResolveActorUseCase {
        directory: state.directory(),
    };
    usecase.execute(principal).await
}
