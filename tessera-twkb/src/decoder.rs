use bytes::Buf;
use serde::{Deserialize, Serialize};
use tessera_types::geometry::Geometry;
use tessera_types::Space;

use crate::buffer::InputBuffer;
use crate::collector::GeometryCollector;
use crate::consumer::GeometryConsumer;
use crate::error::TwkbError;
use crate::parser::RecordReader;

/// What to do with a malformed member of a geometry collection.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberErrorPolicy {
    /// Fail the whole top-level record.
    #[default]
    Abort,
    /// Drop the member and continue with the next one.
    ///
    /// Only members that declare their size can be dropped, since otherwise there is no way to find where the next
    /// member starts. A malformed member without size still fails the whole record.
    Skip,
}

/// Configuration of [`TwkbDecoder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Handling of malformed collection members.
    pub member_error_policy: MemberErrorPolicy,
}

/// Decoder of TWKB buffers.
///
/// ```
/// use tessera_twkb::{GeometryCollector, TwkbDecoder};
/// use tessera_types::geometry::Geometry;
/// use tessera_types::Space;
/// use tessera_types::{LonLat, Vec2};
///
/// let bytes = [0xc1, 0x00, 0xbf, 0xef, 0xe2, 0x43, 0xfc, 0x8b, 0xaa, 0x28];
/// let mut collector = GeometryCollector::<LonLat>::new();
/// TwkbDecoder::new().decode(&bytes[..], &mut collector).unwrap();
///
/// assert_eq!(
///     collector.geometries(),
///     &[Geometry::from(Vec2::new(-71.064544, 42.28787))]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TwkbDecoder {
    options: DecoderOptions,
}

impl TwkbDecoder {
    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given options.
    pub fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// Sets the handling of malformed collection members.
    pub fn with_member_error_policy(mut self, policy: MemberErrorPolicy) -> Self {
        self.options.member_error_policy = policy;
        self
    }

    /// Options of the decoder.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes all TWKB records in the buffer into the consumer, interpreting coordinates in the space `S`.
    ///
    /// Records are decoded one after another until the buffer is exhausted. Every record is decoded completely before
    /// its geometries are pushed into the consumer, so a malformed record never produces partial output. Records
    /// before the malformed one are pushed though.
    pub fn decode<S, B, C>(&self, buffer: B, consumer: &mut C) -> Result<(), TwkbError>
    where
        S: Space,
        B: Buf,
        C: GeometryConsumer<S>,
    {
        let mut buf = InputBuffer::new(buffer);
        let reader = RecordReader::new(self.options.member_error_policy);

        while buf.has_remaining() {
            let record = reader.read_record::<S, _>(&mut buf)?;
            record.emit(consumer);
        }

        Ok(())
    }

    /// Decodes all TWKB records in the buffer into a list of geometries.
    pub fn decode_geometries<S: Space, B: Buf>(&self, buffer: B) -> Result<Vec<Geometry<S>>, TwkbError> {
        let mut collector = GeometryCollector::new();
        self.decode(buffer, &mut collector)?;
        Ok(collector.into_geometries())
    }
}

/// Decodes the buffer with the default options.
///
/// Shortcut for `TwkbDecoder::new().decode(buffer, consumer)`.
pub fn parse<S, B, C>(buffer: B, consumer: &mut C) -> Result<(), TwkbError>
where
    S: Space,
    B: Buf,
    C: GeometryConsumer<S>,
{
    TwkbDecoder::new().decode(buffer, consumer)
}

#[cfg(test)]
mod tests {
    use insta::assert_compact_debug_snapshot;
    use tessera_types::{Untyped, Vec2};

    use super::*;

    #[test]
    fn options_from_json() {
        let options: DecoderOptions =
            serde_json::from_str(r#"{"member_error_policy": "skip"}"#).unwrap();
        assert_eq!(options.member_error_policy, MemberErrorPolicy::Skip);

        let options: DecoderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DecoderOptions::default());
        assert_eq!(options.member_error_policy, MemberErrorPolicy::Abort);
    }

    #[test]
    fn builder() {
        let decoder = TwkbDecoder::new().with_member_error_policy(MemberErrorPolicy::Skip);
        assert_eq!(
            decoder.options().member_error_policy,
            MemberErrorPolicy::Skip
        );

        let decoder = TwkbDecoder::with_options(DecoderOptions {
            member_error_policy: MemberErrorPolicy::Skip,
        });
        assert_eq!(
            decoder.options().member_error_policy,
            MemberErrorPolicy::Skip
        );
    }

    #[test]
    fn several_records() {
        let bytes = [0x01, 0x00, 0x02, 0x04, 0x01, 0x00, 0x06, 0x08];
        let geometries = TwkbDecoder::new()
            .decode_geometries::<Untyped, _>(&bytes[..])
            .unwrap();
        assert_eq!(
            geometries,
            vec![
                Geometry::from(Vec2::new(1.0, 2.0)),
                Geometry::from(Vec2::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn failed_record_emits_nothing() {
        // A valid point followed by a line string that ends in the middle of its second point.
        let bytes = [
            0x01, 0x00, 0x02, 0x04, 0x02, 0x00, 0x02, 0x80, 0x01, 0x02, 0x02,
        ];
        let mut collector = GeometryCollector::<Untyped>::new();
        let result = TwkbDecoder::new().decode(&bytes[..], &mut collector);

        assert_compact_debug_snapshot!(result, @"Err(UnexpectedEnd { offset: 11 })");
        assert_eq!(
            collector.geometries(),
            &[Geometry::from(Vec2::new(1.0, 2.0))]
        );
    }

    #[test]
    fn empty_buffer() {
        let geometries = TwkbDecoder::new()
            .decode_geometries::<Untyped, _>(&[0u8; 0][..])
            .unwrap();
        assert!(geometries.is_empty());
    }
}
