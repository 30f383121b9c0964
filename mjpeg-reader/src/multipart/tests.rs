use crate::multipart::{Boundary, Demultiplexer, FramePayload, MultipartError, ParserState};
use alloc::{format, vec::Vec};

#[test]
fn closing_delimiter_goes_back_to_scanning() {
  let mut demux = demux();
  let mut body = part(&jpeg(40), true);
  body.extend_from_slice(b"\r\n--frame--\r\n");
  assert_eq!(collect(&mut demux, &[&body]).len(), 1);
  assert_eq!(demux.state(), ParserState::AwaitingBoundary);
  let frames = collect(&mut demux, &[&part(&jpeg(40), true), b"\r\n--frame\r\n"]);
  assert_eq!(frames.len(), 1);
  assert_eq!(frames[0].sequence(), 1);
}

#[test]
fn detects_undeclared_boundary() {
  let mut demux = Demultiplexer::new(None);
  let mut body = Vec::from(&b"\r\n"[..]);
  body.extend_from_slice(&part_with_marker(b"--ipcamera", &jpeg(64), true));
  body.extend_from_slice(b"\r\n--ipcamera\r\n");
  let frames = collect(&mut demux, &[&body]);
  assert_eq!(frames.len(), 1);
  assert_eq!(frames[0].bytes(), jpeg(64));
  assert_eq!(demux.boundary().map(Boundary::marker), Some(&b"--ipcamera"[..]));
}

#[test]
fn discards_partial_state_on_finish() {
  let mut demux = demux();
  let body = part(&jpeg(100), true);
  assert!(collect(&mut demux, &[&body[..body.len() - 10]]).is_empty());
  assert_eq!(demux.finish(), 90);
  assert_eq!(demux.buffered_len(), 0);
  assert_eq!(demux.state(), ParserState::AwaitingBoundary);
  assert!(collect(&mut demux, &[&body[body.len() - 10..]]).is_empty());
  assert_eq!(demux.frames(), 0);
}

#[test]
fn fails_once_after_overflow() {
  let mut demux = demux();
  let _ = demux.set_max_buffer_len(64);
  let mut frames = 0;
  let rslt = demux.feed(&[b'x'; 100], |_| {
    frames += 1;
    Ok(())
  });
  assert!(matches!(
    rslt,
    Err(crate::Error::MultipartError(MultipartError::BufferOverflow { limit: 64 }))
  ));
  assert_eq!(frames, 0);
  assert_eq!(demux.state(), ParserState::Failed);
  assert_eq!(demux.buffered_len(), 0);
  assert!(matches!(
    demux.feed(&part(&jpeg(10), true), |_| Ok(())),
    Err(crate::Error::MultipartError(MultipartError::FailedDemultiplexer))
  ));
  demux.reset(Some(Boundary::new(b"frame").unwrap()));
  let mut body = part(&jpeg(10), true);
  body.extend_from_slice(b"\r\n--frame");
  assert_eq!(collect(&mut demux, &[&body]).len(), 1);
}

#[test]
fn resyncs_after_malformed_parts() {
  let mut demux = demux();
  let mut body = part(&jpeg(50), true);
  body.extend_from_slice(b"\r\n--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 5\r\n\r\nhello");
  body.extend_from_slice(b"\r\n--frame\r\nContent-Length: abc\r\n\r\n\xFF\xD8\xFF\xD9");
  body.extend_from_slice(b"\r\n");
  body.extend_from_slice(&part(&jpeg(60), true));
  body.extend_from_slice(b"\r\n--frame\r\n");
  let frames = collect(&mut demux, &[&body]);
  assert_eq!(frames.len(), 2);
  assert_eq!(frames[0].bytes(), jpeg(50));
  assert_eq!(frames[1].bytes(), jpeg(60));
  assert_eq!(frames[1].sequence(), 1);
  assert_eq!(demux.resyncs(), 2);
}

#[test]
fn resyncs_after_very_large_values() {
  let mut demux = demux();
  let _ = demux.set_max_buffer_len(1024).set_max_header_len(64);
  let mut body = Vec::from(&b"--frame\r\nContent-Length: 999999\r\n\r\n"[..]);
  body.extend_from_slice(b"--frame\r\nX-Filler: ");
  body.extend_from_slice(&[b'a'; 64]);
  body.extend_from_slice(b"\r\n\r\n");
  body.extend_from_slice(&part(&jpeg(30), true));
  body.extend_from_slice(b"\r\n--frame\r\n");
  let frames = collect(&mut demux, &[&body]);
  assert_eq!(frames.len(), 1);
  assert_eq!(frames[0].bytes(), jpeg(30));
  assert_eq!(demux.resyncs(), 2);
}

#[test]
fn two_frames_over_three_chunks() {
  let mut demux = demux();
  let mut body = part(&jpeg(500), true);
  body.extend_from_slice(b"\r\n");
  body.extend_from_slice(&part(&jpeg(500), true));
  body.extend_from_slice(b"\r\n--frame\r\n");
  let frames = collect(&mut demux, &[&body[..300], &body[300..700], &body[700..]]);
  assert_eq!(frames.len(), 2);
  for (idx, frame) in frames.iter().enumerate() {
    assert_eq!(frame.len(), 500);
    assert_eq!(frame.sequence(), u64::try_from(idx).unwrap());
    assert!(frame.bytes().starts_with(&[0xFF, 0xD8]));
  }
  assert_eq!(demux.resyncs(), 0);
}

#[test]
fn undeclared_lengths_end_at_the_image_end() {
  let mut demux = demux();
  let mut thumbnail_jpeg = Vec::from(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x06, 0xFF, 0xD8, 0xFF, 0xD9][..]);
  thumbnail_jpeg.extend_from_slice(&jpeg(20)[2..]);
  let mut body = part(&thumbnail_jpeg, false);
  body.extend_from_slice(b"\r\n");
  body.extend_from_slice(&part(&jpeg(20), false));
  let frames = collect(&mut demux, &[&body]);
  assert_eq!(frames.len(), 2);
  assert_eq!(frames[0].bytes(), thumbnail_jpeg);
  assert_eq!(frames[1].bytes(), jpeg(20));
}

#[test]
fn undeclared_lengths_without_structure_end_at_boundaries() {
  let mut demux = demux();
  let garbage_jpeg = [0xFF, 0xD8, 0x01, 0x02, 0x03, 0x04];
  let mut body = part(&garbage_jpeg, false);
  body.extend_from_slice(b"\r\n--frame\r\n");
  let frames = collect(&mut demux, &[&body[..9], &body[9..]]);
  assert_eq!(frames.len(), 1);
  assert_eq!(frames[0].bytes(), garbage_jpeg);
}

#[test_strategy::proptest]
fn split_invariance(splits: Vec<u16>) {
  let mut body = part(&jpeg(120), true);
  body.extend_from_slice(b"\r\n");
  body.extend_from_slice(&part(&jpeg(80), false));
  body.extend_from_slice(b"\r\n--frame\r\nContent-Length: 3\r\n\r\nbad\r\n");
  body.extend_from_slice(&part(&jpeg(200), true));
  body.extend_from_slice(b"\r\n--frame\r\n");
  let mut demux = demux();
  let frames = collect(&mut demux, &split(&body, &splits));
  let lens: Vec<usize> = frames.iter().map(FramePayload::len).collect();
  assert_eq!(lens, [120, 80, 200]);
  assert_eq!(demux.resyncs(), 1);
}

#[test_strategy::proptest]
fn split_invariance_with_detected_boundary(splits: Vec<u16>) {
  let mut body = Vec::from(&b"Camera preamble\r\n"[..]);
  body.extend_from_slice(&part_with_marker(b"--ipcamera", &jpeg(120), true));
  body.extend_from_slice(b"\r\n");
  body.extend_from_slice(&part_with_marker(b"--ipcamera", &jpeg(80), false));
  body.extend_from_slice(b"\r\n--ipcamera\r\n");
  let mut demux = Demultiplexer::new(None);
  let frames = collect(&mut demux, &split(&body, &splits));
  let lens: Vec<usize> = frames.iter().map(FramePayload::len).collect();
  assert_eq!(lens, [120, 80]);
  assert_eq!(demux.resyncs(), 0);
  assert_eq!(demux.boundary().map(Boundary::marker), Some(&b"--ipcamera"[..]));
}

fn collect(demux: &mut Demultiplexer, chunks: &[&[u8]]) -> Vec<FramePayload> {
  let mut frames = Vec::new();
  for chunk in chunks {
    let _ = demux
      .feed(chunk, |frame| {
        frames.push(frame);
        Ok(())
      })
      .unwrap();
  }
  frames
}

fn demux() -> Demultiplexer {
  Demultiplexer::new(Some(Boundary::new(b"frame").unwrap()))
}

// Cuts `body` at every point of `splits`, wrapped around its length.
fn split<'body>(body: &'body [u8], splits: &[u16]) -> Vec<&'body [u8]> {
  let mut points: Vec<usize> = splits.iter().map(|el| usize::from(*el) % body.len()).collect();
  points.push(0);
  points.push(body.len());
  points.sort_unstable();
  points.windows(2).map(|el| &body[el[0]..el[1]]).collect()
}

// SOI, a comment segment that fills `len` and EOI.
fn jpeg(len: usize) -> Vec<u8> {
  let data_len = len - 8;
  let segment_len = u16::try_from(data_len + 2).unwrap();
  let mut rslt = Vec::with_capacity(len);
  rslt.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xFE]);
  rslt.extend_from_slice(&segment_len.to_be_bytes());
  rslt.extend((0..data_len).map(|idx| b'a' + u8::try_from(idx % 26).unwrap()));
  rslt.extend_from_slice(&[0xFF, 0xD9]);
  rslt
}

fn part(payload: &[u8], with_len: bool) -> Vec<u8> {
  part_with_marker(b"--frame", payload, with_len)
}

fn part_with_marker(marker: &[u8], payload: &[u8], with_len: bool) -> Vec<u8> {
  let mut rslt = Vec::from(marker);
  rslt.extend_from_slice(b"\r\nContent-Type: image/jpeg\r\n");
  if with_len {
    rslt.extend_from_slice(format!("Content-Length: {}\r\n", payload.len()).as_bytes());
  }
  rslt.extend_from_slice(b"\r\n");
  rslt.extend_from_slice(payload);
  rslt
}
