use std::fs;
use std::path::Path;

use tempfile::TempDir;
use whiteout_core::codec::permutation::{adaptive_order, global_order};
use whiteout_core::codec::{Header, HeaderCodec, OccupancyMap, PayloadCodec, HEADER_PIXELS};
use whiteout_core::media::bmp::{BitmapHeader, BMP_FILE_TYPE, BMP_HEADER_LEN};
use whiteout_core::*;

/// 24 bpp bitmap with a gradient, `gap` bytes between headers and pixels.
fn write_carrier(path: &Path, width: i32, height: i32, gap: usize) -> Vec<u8> {
    let row = (width as usize * 3).div_ceil(4) * 4;
    let size_image = row * height as usize;
    let offset = BMP_HEADER_LEN + gap;
    let header = BitmapHeader {
        file_type: BMP_FILE_TYPE,
        file_size: (offset + size_image) as u32,
        reserved1: 0,
        reserved2: 0,
        offset_data: offset as u32,
        size: 40,
        width,
        height,
        planes: 1,
        bit_count: 24,
        compression: 0,
        size_image: size_image as u32,
        x_pixels_per_meter: 2835,
        y_pixels_per_meter: 2835,
        colors_used: 0,
        colors_important: 0,
    };

    let mut data = Vec::new();
    header.write_to(&mut data).expect("header not writable");
    data.extend(std::iter::repeat(0xaa).take(gap));
    data.extend((0..size_image).map(|i| ((i / 3) * 17 % 256) as u8 ^ (i % 5) as u8));
    fs::write(path, &data).expect("carrier not writable");

    data
}

#[test]
fn should_hide_and_unveil_a_binary_file() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("carrier.bmp");
    let secret_image = dir.path().join("secret.bmp");
    let secret = dir.path().join("random_1666_byte.bin");
    let out = TempDir::new()?;
    let plain = write_carrier(&carrier, 200, 150, 0);
    let mut rng = fastrand::Rng::with_seed(1666);
    let content: Vec<u8> = (0..1666).map(|_| rng.u8(..)).collect();
    fs::write(&secret, &content)?;

    for bits in 1..=8 {
        fs::copy(&carrier, &secret_image)?;
        let completion = commands::hide(
            &secret_image,
            &secret,
            None,
            Some("SuperSecret42".to_string()),
            CodecOptions::default().with_bit_depth(BitDepth::new(bits)?),
        )?;
        assert_eq!(completion, Completion::Complete);
        assert_eq!(fs::read(&secret_image)?.len(), plain.len());

        let report = commands::unveil(
            &secret_image,
            out.path(),
            Some("SuperSecret42".to_string()),
        )?;
        assert_eq!(report.file, out.path().join("random_1666_byte.bin"));
        assert_eq!(fs::read(&report.file)?, content, "depth {bits}");
    }
    Ok(())
}

#[test]
fn should_keep_the_bitmap_layout_intact() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("carrier.bmp");
    let secret = dir.path().join("note.txt");
    let plain = write_carrier(&carrier, 33, 17, 68);
    fs::write(&secret, "keep the palette")?;

    commands::hide(&carrier, &secret, None, None, CodecOptions::default())?;
    let hidden = fs::read(&carrier)?;
    assert_eq!(hidden.len(), plain.len());
    assert_eq!(hidden[..BMP_HEADER_LEN + 68], plain[..BMP_HEADER_LEN + 68]);

    commands::unveil(&carrier, dir.path(), None)?;
    let wiped = fs::read(&carrier)?;
    assert_eq!(wiped[..BMP_HEADER_LEN + 68], plain[..BMP_HEADER_LEN + 68]);
    assert_eq!(fs::read_to_string(dir.path().join("note.txt"))?, "keep the palette");
    Ok(())
}

#[test]
fn should_wipe_the_data_from_the_image_file() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("carrier.bmp");
    let secret = dir.path().join("note.txt");
    write_carrier(&carrier, 64, 64, 0);
    fs::write(&secret, "read me once")?;

    commands::hide(&carrier, &secret, None, Some("pw".into()), CodecOptions::default())?;
    let hidden = Bitmap::open(&carrier)?;
    commands::unveil(&carrier, dir.path(), Some("pw".into()))?;
    let wiped = Bitmap::open(&carrier)?;

    let changed: Vec<(u8, u8)> = hidden
        .pixels()
        .as_bytes()
        .iter()
        .zip(wiped.pixels().as_bytes())
        .filter(|(a, b)| a != b)
        .map(|(&a, &b)| (a, b))
        .collect();
    assert!(!changed.is_empty());
    assert!(changed.iter().all(|&(_, after)| after == 255));

    assert!(matches!(
        commands::unveil(&carrier, dir.path(), Some("pw".into())),
        Err(WhiteoutError::SignatureMismatch)
    ));
    Ok(())
}

#[test]
fn should_report_too_small_images() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("tiny.bmp");
    let secret = dir.path().join("note.txt");
    // 5x5 at 24 bpp is 80 bytes including padding, less than the header needs
    let plain = write_carrier(&carrier, 5, 5, 0);
    fs::write(&secret, "does not fit")?;

    let result = commands::hide(&carrier, &secret, None, None, CodecOptions::default());

    assert!(matches!(
        result,
        Err(WhiteoutError::CapacityExceeded {
            required: 96,
            available: 80
        })
    ));
    assert_eq!(fs::read(&carrier)?, plain);
    Ok(())
}

#[test]
fn should_save_the_wiped_image_when_the_packet_is_malformed() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("carrier.bmp");
    let out = TempDir::new()?;
    write_carrier(&carrier, 64, 64, 0);

    // a valid header followed by a packet without a name separator
    let password = Password::from("pw");
    let bit_depth = BitDepth::new(2)?;
    let mut packet = b"abcd".to_vec();
    password.apply_keystream(&mut packet);
    let mut bitmap = Bitmap::open(&carrier)?;
    let plane = bitmap.pixels_mut();
    let stride = plane.stride();
    let pixels = plane.as_bytes_mut();
    let order = global_order(password.seed(), pixels.len());
    let mut occupancy = OccupancyMap::new(pixels.len());
    let header = Header::new(bit_depth, packet.len() as u32).to_bytes();
    HeaderCodec::write(pixels, order.as_slice(), &header, &mut occupancy)?;
    let required = bit_depth.pixels_for(packet.len());
    let pool = adaptive_order(password.seed(), pixels, stride, bit_depth, required);
    PayloadCodec::new(bit_depth).write(pixels, &pool, &occupancy, &packet)?;
    bitmap.save_as(&carrier)?;
    let planted = Bitmap::open(&carrier)?;

    let result = commands::unveil(&carrier, out.path(), Some("pw".into()));

    assert!(matches!(result, Err(WhiteoutError::MalformedPacket)));
    let wiped = Bitmap::open(&carrier)?;
    let changed: Vec<u8> = planted
        .pixels()
        .as_bytes()
        .iter()
        .zip(wiped.pixels().as_bytes())
        .filter(|(a, b)| a != b)
        .map(|(_, &b)| b)
        .collect();
    assert!(!changed.is_empty());
    assert!(changed.len() <= HEADER_PIXELS + required);
    assert!(changed.iter().all(|&b| b == 255));
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[test]
fn should_report_the_same_truncation_on_both_sides() -> Result<()> {
    let dir = TempDir::new()?;
    let carrier = dir.path().join("small.bmp");
    let secret = dir.path().join("big.bin");
    let out = TempDir::new()?;
    write_carrier(&carrier, 20, 20, 0);
    let content: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
    fs::write(&secret, &content)?;

    let hidden = commands::hide(
        &carrier,
        &secret,
        None,
        Some("pw".into()),
        CodecOptions::default(),
    )?;
    let Completion::Truncated { stored, expected } = hidden else {
        panic!("expected a truncated embedding, got {hidden:?}");
    };
    let name_len = secret.to_string_lossy().len();
    assert_eq!(expected, name_len + 1 + content.len());
    assert!(stored > name_len + 1);

    let report = commands::unveil(&carrier, out.path(), Some("pw".into()))?;

    assert_eq!(report.completion, hidden);
    assert_eq!(report.file, out.path().join("big.bin"));
    assert_eq!(fs::read(&report.file)?, content[..stored - name_len - 1]);
    Ok(())
}
