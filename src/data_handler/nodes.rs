//! Default RPC node list seeded into every new development account.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcNode {
    pub name: String,
    /// Empty for nodes that are reached through an indexer API rather than
    /// a JSON-RPC endpoint.
    pub endpoint: String,
    pub owned: bool,
    pub active: bool,
    /// Share of queries routed to this node, 0.0 – 1.0.
    pub weight: f64,
    pub blockchain: String,
}

const DEFAULT_NODES: &[(&str, &str, f64, &str)] = &[
    ("etherscan", "", 0.28, "ETH"),
    ("mycrypto", "https://api.mycryptoapi.com/eth", 0.07, "ETH"),
    ("blockscout", "https://mainnet-nethermind.blockscout.com/", 0.1, "ETH"),
    ("avado pool", "https://mainnet.eth.cloud.ava.do/", 0.05, "ETH"),
    ("1inch", "https://web3.1inch.exchange", 0.15, "ETH"),
    ("myetherwallet", "https://nodes.mewapi.io/rpc/eth", 0.15, "ETH"),
    ("cloudflare", "https://cloudflare-eth.com/", 0.1, "ETH"),
    ("ankr", "https://rpc.ankr.com/eth", 0.1, "ETH"),
    ("optimism etherscan", "", 0.4, "OPTIMISM"),
    ("optimism ankr", "https://rpc.ankr.com/optimism", 0.2, "OPTIMISM"),
    ("optimism blastapi", "https://optimism-mainnet.public.blastapi.io", 0.2, "OPTIMISM"),
    ("optimism official", "https://mainnet.optimism.io", 0.2, "OPTIMISM"),
];

pub fn default_rpc_nodes() -> Vec<RpcNode> {
    DEFAULT_NODES
        .iter()
        .map(|&(name, endpoint, weight, blockchain)| RpcNode {
            name: name.into(),
            endpoint: endpoint.into(),
            owned: false,
            active: true,
            weight,
            blockchain: blockchain.into(),
        })
        .collect()
}
