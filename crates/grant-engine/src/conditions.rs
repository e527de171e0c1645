//! Condition filtering over fetched permission records.

use grant_rbac::Permission;
use grant_store::StoreResult;

use crate::membership::MembershipIndex;

/// Drop conditioned records whose condition does not hold for `acting_user`.
///
/// Unconditioned records always pass. With no acting user every conditioned
/// record passes. Otherwise a record passes iff its condition carries the
/// administrative-scope flag and
/// [`MembershipIndex::is_authorized_within_group`] holds for the record's
/// group. Conditions without the flag are dropped.
///
/// Unconditioned records come first in the output, each group in its input
/// order.
pub async fn apply_conditions(
    index: &MembershipIndex,
    records: Vec<Permission>,
    acting_user: Option<&str>,
) -> StoreResult<Vec<Permission>> {
    let (conditioned, mut passed): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|p| p.condition.is_some());

    let Some(user_id) = acting_user else {
        passed.extend(conditioned);
        return Ok(passed);
    };

    for record in conditioned {
        let flag = record.condition.as_ref().and_then(|c| c.admin_flag());
        if flag.is_none() {
            tracing::warn!(
                id = %record.id,
                "Dropping record with unrecognized condition"
            );
            continue;
        }

        if index
            .is_authorized_within_group(user_id, record.group_id(), flag)
            .await?
        {
            passed.push(record);
        }
    }

    Ok(passed)
}
