use async_trait::async_trait;

use crate::batch_function::{BatchFunction, BatchOutcome};
use crate::models::Validator;
use crate::store::StoreHandle;

/// Loads validators (with their description) by self-delegation address.
pub struct ValidatorBySelfDelegationBatch;

#[async_trait]
impl BatchFunction<String, Validator> for ValidatorBySelfDelegationBatch {
    type Context = StoreHandle;

    async fn load(keys: &[String], store: &StoreHandle) -> BatchOutcome<String, Validator> {
        let validators = store.fetch_validators_by_self_delegation_address(keys).await?;
        Ok(validators.into_iter().map(|v| (v.self_delegation_address.clone(), Ok(v))).collect())
    }
}
