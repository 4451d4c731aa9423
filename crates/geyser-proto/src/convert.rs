//! Conversions between wire types and harness domain types.

use std::collections::HashMap;

use geyser_harness::{AccountFilter, ProbePayload};

use crate::geyser::subscribe_update::UpdateOneof;
use crate::geyser::{
    GetBlockHeightResponse, GetLatestBlockhashResponse, GetSlotResponse, SubscribeRequest,
    SubscribeRequestFilterAccounts, SubscribeUpdate,
};

impl From<GetLatestBlockhashResponse> for ProbePayload {
    fn from(response: GetLatestBlockhashResponse) -> Self {
        ProbePayload::LatestBlockhash {
            slot: response.slot,
            blockhash: response.blockhash,
            last_valid_block_height: response.last_valid_block_height,
        }
    }
}

impl From<GetBlockHeightResponse> for ProbePayload {
    fn from(response: GetBlockHeightResponse) -> Self {
        ProbePayload::BlockHeight(response.block_height)
    }
}

impl From<GetSlotResponse> for ProbePayload {
    fn from(response: GetSlotResponse) -> Self {
        ProbePayload::Slot(response.slot)
    }
}

impl From<SubscribeUpdate> for ProbePayload {
    fn from(update: SubscribeUpdate) -> Self {
        let (kind, slot) = match update.update_oneof {
            Some(UpdateOneof::Account(account)) => ("account", Some(account.slot)),
            Some(UpdateOneof::Slot(slot)) => ("slot", Some(slot.slot)),
            Some(UpdateOneof::Ping(_)) => ("ping", None),
            None => ("empty", None),
        };
        ProbePayload::Update {
            kind: kind.to_string(),
            slot,
        }
    }
}

impl From<&AccountFilter> for SubscribeRequest {
    fn from(filter: &AccountFilter) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            filter.name.clone(),
            SubscribeRequestFilterAccounts {
                account: filter.accounts.clone(),
                owner: Vec::new(),
            },
        );
        SubscribeRequest {
            accounts,
            commitment: None,
        }
    }
}
