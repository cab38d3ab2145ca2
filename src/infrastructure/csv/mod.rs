// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited list encoding and decoding for attribute values

mod value_codec;

pub use value_codec::ValueCodec;
