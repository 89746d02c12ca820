use bytes::{Buf, Bytes};
use tessera_types::geometry::{
    LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon, Ring,
};
use tessera_types::Vec2;

use crate::buffer::{zigzag_decode, InputBuffer};
use crate::consumer::{GeometryConsumer, GeometryType};
use crate::decoder::MemberErrorPolicy;
use crate::error::TwkbError;

const HAS_BBOX: u8 = 0x01;
const HAS_SIZE: u8 = 0x02;
const HAS_ID_LIST: u8 = 0x04;
const HAS_EXTENDED_DIMS: u8 = 0x08;
const IS_EMPTY: u8 = 0x10;

const HAS_Z: u8 = 0x01;
const HAS_M: u8 = 0x02;

/// Smallest possible record: type byte and metadata byte.
const MIN_RECORD_SIZE: usize = 2;

/// Maximum nesting level of collection members. Top-level records are at level 0.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Fully decoded TWKB record, not yet pushed to a consumer.
#[derive(Debug, PartialEq)]
pub(crate) enum Decoded<S> {
    Empty(GeometryType),
    Point(Vec2<S>),
    LineString(LineString<S>),
    Polygon(Polygon<S>),
    MultiPoint {
        geometry: MultiPoint<S>,
        has_ids: bool,
    },
    MultiLineString {
        geometry: MultiLineString<S>,
        has_ids: bool,
    },
    MultiPolygon {
        geometry: MultiPolygon<S>,
        has_ids: bool,
    },
    Collection(Vec<Decoded<S>>),
}

impl<S> Decoded<S> {
    pub fn emit(self, consumer: &mut impl GeometryConsumer<S>) {
        match self {
            Decoded::Empty(geometry_type) => consumer.on_empty(geometry_type),
            Decoded::Point(point) => consumer.on_point(point),
            Decoded::LineString(line_string) => consumer.on_line_string(line_string),
            Decoded::Polygon(polygon) => consumer.on_polygon(polygon),
            Decoded::MultiPoint {
                geometry,
                has_ids: true,
            } => {
                for point in geometry.into_points() {
                    consumer.on_point(point);
                }
            }
            Decoded::MultiPoint { geometry, .. } => consumer.on_multi_point(geometry),
            Decoded::MultiLineString {
                geometry,
                has_ids: true,
            } => {
                for line_string in geometry.into_parts() {
                    consumer.on_line_string(line_string);
                }
            }
            Decoded::MultiLineString { geometry, .. } => consumer.on_multi_line_string(geometry),
            Decoded::MultiPolygon {
                geometry,
                has_ids: true,
            } => {
                for polygon in geometry.into_parts() {
                    consumer.on_polygon(polygon);
                }
            }
            Decoded::MultiPolygon { geometry, .. } => consumer.on_multi_polygon(geometry),
            Decoded::Collection(members) => {
                for member in members {
                    member.emit(consumer);
                }
            }
        }
    }
}

struct Header {
    geometry_type: GeometryType,
    precision: i32,
    flags: u8,
    dimensions: usize,
}

impl Header {
    fn read<B: Buf>(buf: &mut InputBuffer<B>) -> Result<Self, TwkbError> {
        let type_byte = buf.read_u8()?;
        let geometry_type = GeometryType::try_from(type_byte & 0x0f)?;
        let precision = zigzag_decode(u64::from(type_byte >> 4)) as i32;
        let flags = buf.read_u8()?;

        let mut dimensions = 2;
        if flags & HAS_EXTENDED_DIMS != 0 {
            let extended = buf.read_u8()?;
            if extended & HAS_Z != 0 {
                dimensions += 1;
            }
            if extended & HAS_M != 0 {
                dimensions += 1;
            }
        }

        Ok(Self {
            geometry_type,
            precision,
            flags,
            dimensions,
        })
    }

    fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Reads the size field if the record has one and splits the rest of the record into a separate buffer.
    fn split_content<B: Buf>(
        &self,
        buf: &mut InputBuffer<B>,
    ) -> Result<Option<InputBuffer<Bytes>>, TwkbError> {
        if !self.has(HAS_SIZE) {
            return Ok(None);
        }

        let size = buf.read_var_uint()?;
        buf.split_to(size).map(Some)
    }
}

/// Running coordinate of one record.
///
/// Every coordinate in a record is stored as a difference from the previous one, across all points, rings and parts
/// of the record. A new record (including a member of a collection) starts from zero again.
struct Coordinates {
    precision: i32,
    dimensions: usize,
    current: [i64; 4],
}

impl Coordinates {
    fn new(header: &Header) -> Self {
        Self {
            precision: header.precision,
            dimensions: header.dimensions,
            current: [0; 4],
        }
    }

    fn scale(&self, value: i64) -> f64 {
        if self.precision >= 0 {
            value as f64 / 10f64.powi(self.precision)
        } else {
            value as f64 * 10f64.powi(-self.precision)
        }
    }

    fn read_point<S, B: Buf>(&mut self, buf: &mut InputBuffer<B>) -> Result<Vec2<S>, TwkbError> {
        for value in self.current.iter_mut().take(self.dimensions) {
            *value = value.wrapping_add(buf.read_var_int()?);
        }

        Ok(Vec2::new(self.scale(self.current[0]), self.scale(self.current[1])))
    }

    fn read_points<S, B: Buf>(
        &mut self,
        buf: &mut InputBuffer<B>,
    ) -> Result<Vec<Vec2<S>>, TwkbError> {
        let count = buf.read_count(self.dimensions)?;
        self.read_points_n(buf, count)
    }

    fn read_points_n<S, B: Buf>(
        &mut self,
        buf: &mut InputBuffer<B>,
        count: usize,
    ) -> Result<Vec<Vec2<S>>, TwkbError> {
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(self.read_point(buf)?);
        }

        Ok(points)
    }

    fn read_polygon<S, B: Buf>(&mut self, buf: &mut InputBuffer<B>) -> Result<Polygon<S>, TwkbError> {
        let count = buf.read_count(1)?;
        let mut rings = Vec::with_capacity(count);
        for _ in 0..count {
            rings.push(Ring::new(self.read_points(buf)?));
        }

        Ok(Polygon::new(rings))
    }
}

/// Reads TWKB records from a buffer.
pub(crate) struct RecordReader {
    member_error_policy: MemberErrorPolicy,
}

impl RecordReader {
    pub fn new(member_error_policy: MemberErrorPolicy) -> Self {
        Self {
            member_error_policy,
        }
    }

    /// Reads one complete top-level record.
    pub fn read_record<S, B: Buf>(
        &self,
        buf: &mut InputBuffer<B>,
    ) -> Result<Decoded<S>, TwkbError> {
        let header = Header::read(buf)?;
        match header.split_content(buf)? {
            Some(mut content) => self.read_sized_content(&header, &mut content, 0),
            None => self.read_content(&header, buf, 0),
        }
    }

    /// Reads one member of a collection. Returns `None` if a malformed member was skipped.
    fn read_member<S, B: Buf>(
        &self,
        buf: &mut InputBuffer<B>,
        depth: usize,
    ) -> Result<Option<Decoded<S>>, TwkbError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(TwkbError::NestingTooDeep {
                offset: buf.offset(),
            });
        }

        let header = Header::read(buf)?;
        let Some(mut content) = header.split_content(buf)? else {
            return self.read_content(&header, buf, depth).map(Some);
        };

        let start = content.offset();
        match self.read_sized_content(&header, &mut content, depth) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => match self.member_error_policy {
                MemberErrorPolicy::Skip => {
                    log::warn!("Skipping malformed collection member at byte {start}: {err}");
                    Ok(None)
                }
                MemberErrorPolicy::Abort => Err(err),
            },
        }
    }

    fn read_sized_content<S>(
        &self,
        header: &Header,
        content: &mut InputBuffer<Bytes>,
        depth: usize,
    ) -> Result<Decoded<S>, TwkbError> {
        let decoded = self.read_content(header, content, depth)?;
        if content.has_remaining() {
            return Err(TwkbError::InvalidSize {
                declared: content.consumed() + content.remaining(),
                consumed: content.consumed(),
            });
        }

        Ok(decoded)
    }

    fn read_content<S, B: Buf>(
        &self,
        header: &Header,
        buf: &mut InputBuffer<B>,
        depth: usize,
    ) -> Result<Decoded<S>, TwkbError> {
        if header.has(IS_EMPTY) {
            return Ok(Decoded::Empty(header.geometry_type));
        }

        if header.has(HAS_BBOX) {
            skip_bbox(header, buf)?;
        }

        let mut coords = Coordinates::new(header);
        let decoded = match header.geometry_type {
            GeometryType::Point => Decoded::Point(coords.read_point(buf)?),
            GeometryType::LineString => Decoded::LineString(LineString::new(coords.read_points(buf)?)),
            GeometryType::Polygon => Decoded::Polygon(coords.read_polygon(buf)?),
            GeometryType::MultiPoint => {
                let count = buf.read_count(header.dimensions)?;
                let has_ids = skip_id_list(header, count, buf)?;
                let points = coords.read_points_n(buf, count)?;
                Decoded::MultiPoint {
                    geometry: MultiPoint::new(points),
                    has_ids,
                }
            }
            GeometryType::MultiLineString => {
                let count = buf.read_count(1)?;
                let has_ids = skip_id_list(header, count, buf)?;
                let mut parts = Vec::with_capacity(count);
                for _ in 0..count {
                    parts.push(LineString::new(coords.read_points(buf)?));
                }

                Decoded::MultiLineString {
                    geometry: MultiLineString::new(parts),
                    has_ids,
                }
            }
            GeometryType::MultiPolygon => {
                let count = buf.read_count(1)?;
                let has_ids = skip_id_list(header, count, buf)?;
                let mut parts = Vec::with_capacity(count);
                for _ in 0..count {
                    parts.push(coords.read_polygon(buf)?);
                }

                Decoded::MultiPolygon {
                    geometry: MultiPolygon::new(parts),
                    has_ids,
                }
            }
            GeometryType::Collection => {
                let count = buf.read_count(MIN_RECORD_SIZE)?;
                skip_id_list(header, count, buf)?;

                let mut members = Vec::with_capacity(count);
                for _ in 0..count {
                    match self.read_member(buf, depth + 1)? {
                        Some(Decoded::Empty(geometry_type)) => {
                            log::trace!("Empty {geometry_type:?} collection member skipped");
                        }
                        Some(member) => members.push(member),
                        None => {}
                    }
                }

                Decoded::Collection(members)
            }
        };

        Ok(decoded)
    }
}

fn skip_bbox<B: Buf>(header: &Header, buf: &mut InputBuffer<B>) -> Result<(), TwkbError> {
    let mut bbox = [0i64; 8];
    for value in bbox.iter_mut().take(header.dimensions * 2) {
        *value = buf.read_var_int()?;
    }

    log::trace!(
        "Bounding box of {:?} record is ignored: {:?}",
        header.geometry_type,
        &bbox[..header.dimensions * 2]
    );
    Ok(())
}

/// Reads the id list if the record has one. Returns true if the list was present.
fn skip_id_list<B: Buf>(
    header: &Header,
    count: usize,
    buf: &mut InputBuffer<B>,
) -> Result<bool, TwkbError> {
    if !header.has(HAS_ID_LIST) {
        return Ok(false);
    }

    for _ in 0..count {
        buf.read_var_int()?;
    }

    Ok(true)
}
