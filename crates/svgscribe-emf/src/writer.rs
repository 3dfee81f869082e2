use crate::objects::colorref;
use crate::records::*;
use byteorder::{ByteOrder, LittleEndian};
use svgscribe_core::Color;

/// Builds enhanced-metafile buffers record by record.
///
/// Used by stroke renderers that synthesize their output and by tests that need canned input.
/// [`MetafileWriter::finish`] appends the EOF record and patches the header totals.
#[derive(Debug, Clone)]
pub struct MetafileWriter {
    buf: Vec<u8>,
    records: u32,
    handles: u16,
}

impl Default for MetafileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetafileWriter {
    pub fn new() -> Self {
        let mut w = Self {
            buf: Vec::with_capacity(256),
            records: 0,
            handles: 1,
        };
        let mut header = Vec::with_capacity(HEADER_SIZE as usize - 8);
        put_zeros(&mut header, 32); // bounds, frame
        put_u32(&mut header, ENHMETA_SIGNATURE);
        put_u32(&mut header, 0x0001_0000);
        put_u32(&mut header, 0); // total bytes, patched in `finish`
        put_u32(&mut header, 0); // total records, patched in `finish`
        put_u16(&mut header, 0); // handles, patched in `finish`
        put_u16(&mut header, 0);
        put_zeros(&mut header, 12); // description, palette entries
        put_zeros(&mut header, 16); // device size in pixels and millimeters
        w.record(EMR_HEADER, &header);
        w
    }

    /// Appends one record with the given payload; the size is computed.
    pub fn record(&mut self, record_type: u32, payload: &[u8]) -> &mut Self {
        put_u32(&mut self.buf, record_type);
        put_u32(&mut self.buf, 8 + payload.len() as u32);
        self.buf.extend_from_slice(payload);
        self.records += 1;
        self
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> &mut Self {
        let mut p = Vec::with_capacity(8);
        put_i32(&mut p, x);
        put_i32(&mut p, y);
        self.record(EMR_MOVETOEX, &p)
    }

    pub fn line_to(&mut self, x: i32, y: i32) -> &mut Self {
        let mut p = Vec::with_capacity(8);
        put_i32(&mut p, x);
        put_i32(&mut p, y);
        self.record(EMR_LINETO, &p)
    }

    fn points16(&mut self, record_type: u32, points: &[(i16, i16)]) -> &mut Self {
        let mut p = Vec::with_capacity(20 + points.len() * 4);
        put_bounds16(&mut p, points);
        put_u32(&mut p, points.len() as u32);
        for &(x, y) in points {
            put_i16(&mut p, x);
            put_i16(&mut p, y);
        }
        self.record(record_type, &p)
    }

    fn points32(&mut self, record_type: u32, points: &[(i32, i32)]) -> &mut Self {
        let mut p = Vec::with_capacity(20 + points.len() * 8);
        put_bounds(&mut p, points);
        put_u32(&mut p, points.len() as u32);
        for &(x, y) in points {
            put_i32(&mut p, x);
            put_i32(&mut p, y);
        }
        self.record(record_type, &p)
    }

    pub fn polyline16(&mut self, points: &[(i16, i16)]) -> &mut Self {
        self.points16(EMR_POLYLINE16, points)
    }

    pub fn polyline_to16(&mut self, points: &[(i16, i16)]) -> &mut Self {
        self.points16(EMR_POLYLINETO16, points)
    }

    pub fn polygon16(&mut self, points: &[(i16, i16)]) -> &mut Self {
        self.points16(EMR_POLYGON16, points)
    }

    pub fn polybezier16(&mut self, points: &[(i16, i16)]) -> &mut Self {
        self.points16(EMR_POLYBEZIER16, points)
    }

    pub fn polybezier_to16(&mut self, points: &[(i16, i16)]) -> &mut Self {
        self.points16(EMR_POLYBEZIERTO16, points)
    }

    pub fn polyline(&mut self, points: &[(i32, i32)]) -> &mut Self {
        self.points32(EMR_POLYLINE, points)
    }

    pub fn polygon(&mut self, points: &[(i32, i32)]) -> &mut Self {
        self.points32(EMR_POLYGON, points)
    }

    pub fn polybezier(&mut self, points: &[(i32, i32)]) -> &mut Self {
        self.points32(EMR_POLYBEZIER, points)
    }

    pub fn create_pen(&mut self, handle: u32, style: u32, width: i32, color: &Color) -> &mut Self {
        let mut p = Vec::with_capacity(20);
        put_u32(&mut p, handle);
        put_u32(&mut p, style);
        put_i32(&mut p, width);
        put_i32(&mut p, 0);
        put_u32(&mut p, colorref(color));
        self.note_handle(handle);
        self.record(EMR_CREATEPEN, &p)
    }

    pub fn ext_create_pen(&mut self, handle: u32, style: u32, width: u32, color: &Color) -> &mut Self {
        let mut p = Vec::with_capacity(44);
        put_u32(&mut p, handle);
        put_zeros(&mut p, 16);
        put_u32(&mut p, style);
        put_u32(&mut p, width);
        put_u32(&mut p, BS_SOLID);
        put_u32(&mut p, colorref(color));
        put_u32(&mut p, 0); // hatch
        put_u32(&mut p, 0); // style entries
        self.note_handle(handle);
        self.record(EMR_EXTCREATEPEN, &p)
    }

    pub fn create_brush(&mut self, handle: u32, style: u32, color: &Color, hatch: u32) -> &mut Self {
        let mut p = Vec::with_capacity(16);
        put_u32(&mut p, handle);
        put_u32(&mut p, style);
        put_u32(&mut p, colorref(color));
        put_u32(&mut p, hatch);
        self.note_handle(handle);
        self.record(EMR_CREATEBRUSHINDIRECT, &p)
    }

    pub fn select_object(&mut self, handle: u32) -> &mut Self {
        self.record(EMR_SELECTOBJECT, &handle.to_le_bytes())
    }

    pub fn delete_object(&mut self, handle: u32) -> &mut Self {
        self.record(EMR_DELETEOBJECT, &handle.to_le_bytes())
    }

    /// `xform` is `[m11, m12, m21, m22, dx, dy]`.
    pub fn set_world_transform(&mut self, xform: [f32; 6]) -> &mut Self {
        let mut p = Vec::with_capacity(24);
        put_xform(&mut p, xform);
        self.record(EMR_SETWORLDTRANSFORM, &p)
    }

    pub fn modify_world_transform(&mut self, xform: [f32; 6], mode: u32) -> &mut Self {
        let mut p = Vec::with_capacity(28);
        put_xform(&mut p, xform);
        put_u32(&mut p, mode);
        self.record(EMR_MODIFYWORLDTRANSFORM, &p)
    }

    pub fn begin_path(&mut self) -> &mut Self {
        self.record(EMR_BEGINPATH, &[])
    }

    pub fn end_path(&mut self) -> &mut Self {
        self.record(EMR_ENDPATH, &[])
    }

    pub fn close_figure(&mut self) -> &mut Self {
        self.record(EMR_CLOSEFIGURE, &[])
    }

    pub fn stroke_path(&mut self) -> &mut Self {
        self.record(EMR_STROKEPATH, &[0; 16])
    }

    pub fn fill_path(&mut self) -> &mut Self {
        self.record(EMR_FILLPATH, &[0; 16])
    }

    pub fn stroke_and_fill_path(&mut self) -> &mut Self {
        self.record(EMR_STROKEANDFILLPATH, &[0; 16])
    }

    fn note_handle(&mut self, handle: u32) {
        let next = u16::try_from(handle.saturating_add(1)).unwrap_or(u16::MAX);
        self.handles = self.handles.max(next);
    }

    /// Appends `EMR_EOF`, fills in the header totals and returns the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        let mut eof = Vec::with_capacity(12);
        put_u32(&mut eof, 0);
        put_u32(&mut eof, 0);
        put_u32(&mut eof, 20);
        self.record(EMR_EOF, &eof);

        let total = self.buf.len() as u32;
        LittleEndian::write_u32(&mut self.buf[48..52], total);
        LittleEndian::write_u32(&mut self.buf[52..56], self.records);
        LittleEndian::write_u16(&mut self.buf[56..58], self.handles);
        self.buf
    }
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    let mut b = [0u8; 4];
    LittleEndian::write_u32(&mut b, v);
    out.extend_from_slice(&b);
}

fn put_i32(out: &mut Vec<u8>, v: i32) {
    let mut b = [0u8; 4];
    LittleEndian::write_i32(&mut b, v);
    out.extend_from_slice(&b);
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    let mut b = [0u8; 2];
    LittleEndian::write_u16(&mut b, v);
    out.extend_from_slice(&b);
}

fn put_i16(out: &mut Vec<u8>, v: i16) {
    let mut b = [0u8; 2];
    LittleEndian::write_i16(&mut b, v);
    out.extend_from_slice(&b);
}

fn put_zeros(out: &mut Vec<u8>, n: usize) {
    out.resize(out.len() + n, 0);
}

fn put_xform(out: &mut Vec<u8>, xform: [f32; 6]) {
    for v in xform {
        let mut b = [0u8; 4];
        LittleEndian::write_f32(&mut b, v);
        out.extend_from_slice(&b);
    }
}

fn put_bounds(out: &mut Vec<u8>, points: &[(i32, i32)]) {
    let (mut l, mut t, mut r, mut b) = (0, 0, 0, 0);
    if let Some(&(x, y)) = points.first() {
        (l, t, r, b) = (x, y, x, y);
    }
    for &(x, y) in points {
        l = l.min(x);
        t = t.min(y);
        r = r.max(x);
        b = b.max(y);
    }
    for v in [l, t, r, b] {
        put_i32(out, v);
    }
}

fn put_bounds16(out: &mut Vec<u8>, points: &[(i16, i16)]) {
    let wide: Vec<(i32, i32)> = points
        .iter()
        .map(|&(x, y)| (i32::from(x), i32::from(y)))
        .collect();
    put_bounds(out, &wide);
}
