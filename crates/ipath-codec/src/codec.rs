use ipath_types::NodeValue;

use crate::error::CodecResult;

/// A block codec keyed by its multicodec code.
///
/// Implementations are stateless and shared across threads by the registry.
pub trait Codec: Send + Sync {
    /// Multicodec code this codec handles.
    fn code(&self) -> u64;

    /// Human-readable codec name (e.g. `"dag-pb"`).
    fn name(&self) -> &'static str;

    /// Decode raw block bytes into a node payload.
    fn decode(&self, bytes: &[u8]) -> CodecResult<NodeValue>;

    /// Encode a node payload into raw block bytes.
    fn encode(&self, value: &NodeValue) -> CodecResult<Vec<u8>>;
}
