//! Integration tests for JSON decoding of registry, RPC, and streaming-service
//! payloads.
//!
//! Fixtures follow the shapes the live services return, including fields the
//! client ignores.

use flowsdk::rpc::{RpcContextValue, RpcResponse, KeyedAccount};
use flowsdk::types::*;
use flowsdk::{project, StreamStatus};

// ---------------------------------------------------------------------------
// Token registry
// ---------------------------------------------------------------------------

#[test]
fn test_token_list_decodes() {
    let json = r#"{
        "name": "Solana Token List",
        "logoURI": "https://cdn.jsdelivr.net/gh/trustwallet/assets@master/blockchains/solana/info/logo.png",
        "keywords": ["solana", "spl"],
        "tokens": [
            {
                "chainId": 101,
                "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "symbol": "USDC",
                "name": "USD Coin",
                "decimals": 6,
                "logoURI": "https://example.com/usdc.png",
                "tags": ["stablecoin"],
                "extensions": { "coingeckoId": "usd-coin" }
            },
            {
                "chainId": 103,
                "address": "So11111111111111111111111111111111111111112",
                "symbol": "SOL",
                "name": "Wrapped SOL",
                "decimals": 9
            }
        ]
    }"#;

    let list: TokenList = serde_json::from_str(json).unwrap();
    assert_eq!(list.name, "Solana Token List");
    assert_eq!(list.tokens.len(), 2);
    assert_eq!(list.tokens[0].symbol, "USDC");
    assert_eq!(list.tokens[0].tags, vec!["stablecoin".to_string()]);
    assert_eq!(list.tokens[1].chain_id, 103);
    assert_eq!(list.tokens[1].logo_uri, "");
    assert!(list.tokens[1].tags.is_empty());

    let meta = TokenMetadata::from(list.tokens[0].clone());
    assert_eq!(meta.decimals, 6);
    assert_eq!(meta.logo_uri, "https://example.com/usdc.png");
}

// ---------------------------------------------------------------------------
// Parsed token accounts
// ---------------------------------------------------------------------------

#[test]
fn test_parsed_token_accounts_decode() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "context": { "apiVersion": "1.18.22", "slot": 312345678 },
            "value": [
                {
                    "pubkey": "C2gJg6tKpQs41PRS1nC8aw3ZKNZK3HQQZGVrDFDup5nx",
                    "account": {
                        "lamports": 2039280,
                        "owner": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                        "executable": false,
                        "rentEpoch": 18446744073709551615,
                        "space": 165,
                        "data": {
                            "program": "spl-token",
                            "space": 165,
                            "parsed": {
                                "type": "account",
                                "info": {
                                    "isNative": false,
                                    "mint": "Gssm3vfi8s65R31SBdmQRq6cKeYojGgup7whkw4VCiQj",
                                    "owner": "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T",
                                    "state": "initialized",
                                    "tokenAmount": {
                                        "amount": "1500000000",
                                        "decimals": 9,
                                        "uiAmount": 1.5,
                                        "uiAmountString": "1.5"
                                    }
                                }
                            }
                        }
                    }
                }
            ]
        }
    }"#;

    let resp: RpcResponse<RpcContextValue<Vec<KeyedAccount>>> = serde_json::from_str(json).unwrap();
    assert!(resp.error.is_none());
    let accounts = resp.result.unwrap().value;
    assert_eq!(accounts.len(), 1);
    let info = &accounts[0].account.data.parsed.info;
    assert_eq!(info.mint, "Gssm3vfi8s65R31SBdmQRq6cKeYojGgup7whkw4VCiQj");
    assert_eq!(info.token_amount.amount, 1_500_000_000);
    assert_eq!(info.token_amount.ui_amount, Some(1.5));
    assert_eq!(info.state, "initialized");
}

#[test]
fn test_null_ui_amount_decodes() {
    let json = r#"{
        "mint": "m",
        "owner": "o",
        "tokenAmount": { "amount": "0", "decimals": 0, "uiAmount": null, "uiAmountString": "0" }
    }"#;
    let info: ParsedTokenAccountInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.token_amount.ui_amount, None);
    assert!(!info.is_native);
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

const STREAMS_JSON: &str = r#"[
    [
        "8gkKJcQr3m7hDpNvZUJhp4bZWhT9hYrEvLVQU8aAQb1t",
        {
            "magic": 0,
            "version": 2,
            "createdAt": 1700000000,
            "sender": "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T",
            "recipient": "B8DVFHFWFKtqXcN7Up5MyTJNsqSZTSTQw4totxGEJ3Q5",
            "mint": "Gssm3vfi8s65R31SBdmQRq6cKeYojGgup7whkw4VCiQj",
            "name": "payroll",
            "start": 1700000060,
            "end": 1700000150,
            "cliff": 1700000120,
            "depositedAmount": "10000000000",
            "withdrawnAmount": "0x77359400",
            "canceledAt": 0,
            "canTopup": true,
            "cancelableBySender": true,
            "cancelableByRecipient": false,
            "transferableBySender": true,
            "transferableByRecipient": false,
            "automaticWithdrawal": true,
            "period": 1
        }
    ],
    [
        "3xYv6yjzWbBzY5Fzv7ZbKqS3Lz3sT2dWwLh6fV9XJ7Eq",
        {
            "sender": "B8DVFHFWFKtqXcN7Up5MyTJNsqSZTSTQw4totxGEJ3Q5",
            "recipient": "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T",
            "mint": "unknown",
            "start": 1600000000,
            "end": 1600001000,
            "depositedAmount": 0,
            "withdrawnAmount": 0,
            "canceledAt": 1600000500
        }
    ]
]"#;

#[test]
fn test_stream_pairs_decode() {
    let streams: Vec<(String, StreamRecord)> = serde_json::from_str(STREAMS_JSON).unwrap();
    assert_eq!(streams.len(), 2);

    let (id, first) = &streams[0];
    assert_eq!(id, "8gkKJcQr3m7hDpNvZUJhp4bZWhT9hYrEvLVQU8aAQb1t");
    assert_eq!(first.deposited_amount, 10_000_000_000);
    assert_eq!(first.withdrawn_amount, 2_000_000_000);
    assert!(first.flags.can_topup);
    assert!(first.flags.automatic_withdrawal);
    assert!(!first.flags.transferable_by_recipient);
    assert!(!first.is_canceled());

    let (_, second) = &streams[1];
    assert_eq!(second.name, "");
    assert_eq!(second.cliff, 0);
    assert!(second.is_canceled());
    assert_eq!(second.flags, StreamFlags::default());
}

#[test]
fn test_stream_direction() {
    let streams: Vec<(String, StreamRecord)> = serde_json::from_str(STREAMS_JSON).unwrap();
    let me = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
    assert_eq!(streams[0].1.direction_for(me), Some(StreamDirection::Outgoing));
    assert_eq!(streams[1].1.direction_for(me), Some(StreamDirection::Incoming));
    assert!(streams[0].1.involves(me));
    assert_eq!(streams[0].1.direction_for("stranger"), None);
}

#[test]
fn test_decoded_streams_project() {
    let streams: Vec<(String, StreamRecord)> = serde_json::from_str(STREAMS_JSON).unwrap();

    let live = project(&streams[0].1, 1_700_000_100, None);
    assert_eq!(live.status, StreamStatus::InProgress);
    assert_eq!(live.deposited_display, 10.0);
    assert_eq!(live.withdrawn_display, 2.0);
    assert!((live.progress_ratio - 0.2).abs() < 1e-12);

    let canceled = project(&streams[1].1, 1_700_000_100, None);
    assert_eq!(canceled.status, StreamStatus::Canceled);
    assert_eq!(canceled.progress_ratio, 0.0);
}

#[test]
fn test_projection_serializes_status_snake_case() {
    let streams: Vec<(String, StreamRecord)> = serde_json::from_str(STREAMS_JSON).unwrap();
    let p = project(&streams[0].1, 1_700_000_100, None);
    let value = serde_json::to_value(&p).unwrap();
    assert_eq!(value["status"], "in_progress");
    assert_eq!(value["symbol"], "");
    assert_eq!(value["depositedDisplay"], 10.0);
}

#[test]
fn test_creation_request_encodes_amounts_as_strings() {
    let request = StreamCreationRequest {
        sender: "s".into(),
        recipient: "r".into(),
        mint: "m".into(),
        start: 60,
        deposited_amount: 10_000_000_000,
        amount_per_period: 1_000_000_000,
        period: 1,
        cliff: 120,
        cliff_amount: 1_000_000_000,
        name: "payroll".into(),
        flags: StreamFlags {
            can_topup: true,
            ..Default::default()
        },
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["depositedAmount"], "10000000000");
    assert_eq!(value["amountPerPeriod"], "1000000000");
    assert_eq!(value["canTopup"], true);
    assert_eq!(value["automaticWithdrawal"], false);
}

#[test]
fn test_create_response_decodes() {
    let resp: CreateStreamResponse =
        serde_json::from_str(r#"{"id":"abc","txId":"sig","ixs":[]}"#).unwrap();
    assert_eq!(resp.id, "abc");
    assert_eq!(resp.tx_id.as_deref(), Some("sig"));

    let resp: CreateStreamResponse = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
    assert_eq!(resp.tx_id, None);
}
