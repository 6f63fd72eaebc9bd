//! Custom decoders and collection literals
//!
//! `Node` owns its `id=host:port` wire format; as a sequence or map element
//! it receives one piece of the collection literal per instance.

use std::collections::HashMap;

use envbind::{Bind, BoxError, DecodeEnv, EnvParser};

#[derive(Debug, Default, PartialEq)]
struct Node {
    id: u32,
    addr: String,
}

impl DecodeEnv for Node {
    fn decode_env(&mut self, text: &str) -> Result<(), BoxError> {
        let (id, addr) = text.split_once('=').ok_or("invalid node format")?;
        self.id = id.trim().parse()?;
        self.addr = addr.trim().to_string();
        Ok(())
    }
}

envbind::impl_bind_via_decoder!(Node);

#[derive(Debug, Default, Bind)]
struct ClusterConfig {
    #[env("PEERS;required")]
    peers: Vec<Node>,

    #[env("PEERSMAP")]
    peers_map: HashMap<u32, Node>,

    #[env("IDS;default: 1,2,3")]
    ids: Vec<u64>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("CLUSTER_PEERS", "1=127.0.0.1:8080,2=127.0.0.1:8081");
    std::env::set_var("CLUSTER_PEERSMAP", "1:1=127.0.0.1:8000|2:2=127.0.0.1:8001");

    let config: ClusterConfig = EnvParser::new().with_prefix("CLUSTER").load()?;

    println!("Peers:");
    for peer in &config.peers {
        println!("  node {} at {}", peer.id, peer.addr);
    }
    println!("Peer map: {:?}", config.peers_map);
    println!("IDs (tag default): {:?}", config.ids);

    Ok(())
}
