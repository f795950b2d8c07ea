use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use opc_lights_core::opc::{
    FIRMWARE_CONFIG_NO_DITHERING, OpcMessage, SET_PIXELS, SYSEX_FIRMWARE_CONFIG,
    SYSEX_SET_BRIGHTNESS, SYSEX_SYSTEM_ID, read_message,
};
use opc_lights_core::patterns::{NoisePattern, ScanPattern};
use opc_lights_core::config::NoiseConfig;
use opc_lights_terminal::cli::{AnimationArgs, ServerArgs, SettingsCli};
use opc_lights_terminal::{apply_settings, run_animation};
use smart_leds::RGB8;
use smart_leds::colors::BLACK;

/// accepts one client and keeps every message until it hangs up
fn fake_server() -> (ServerArgs, JoinHandle<Vec<OpcMessage>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut messages = Vec::new();
        while let Some(msg) = read_message(&mut stream).unwrap() {
            messages.push(msg);
        }
        messages
    });

    let server = ServerArgs {
        server: Some(addr.to_string()),
        ip: "127.0.0.1".to_string(),
        port: 0,
    };

    (server, handle)
}

fn animation(framerate: f32, width: usize, height: usize, frames: usize) -> AnimationArgs {
    AnimationArgs {
        framerate,
        width,
        height,
        channel: 0,
        zigzag: false,
        frames: Some(frames),
    }
}

#[test_log::test]
fn test_scan_over_tcp() {
    let (server, handle) = fake_server();

    let color = RGB8::new(0, 0, 100);

    run_animation(ScanPattern::new(color), &server, &animation(500.0, 6, 4, 8)).unwrap();

    let messages = handle.join().unwrap();
    assert_eq!(messages.len(), 8);

    let mut lit = Vec::new();
    for msg in &messages {
        assert_eq!(msg.channel, 0);
        assert_eq!(msg.command, SET_PIXELS);
        assert_eq!(msg.payload.len(), 6 * 4 * 3);

        let pixels = msg.pixels();
        let rows: Vec<usize> = pixels
            .chunks_exact(6)
            .enumerate()
            .filter(|(_, row)| row.iter().all(|x| *x == color))
            .map(|(y, _)| y)
            .collect();
        assert_eq!(rows.len(), 1);

        let dark = pixels.iter().filter(|x| **x == BLACK).count();
        assert_eq!(dark, 6 * 3);

        lit.push(rows[0]);
    }

    assert_eq!(lit, vec![0, 1, 2, 3, 0, 1, 2, 3]);
}

#[test_log::test]
fn test_noise_over_tcp_is_paced() {
    let (server, handle) = fake_server();

    let start = Instant::now();

    run_animation(
        NoisePattern::perlin(&NoiseConfig::default()),
        &server,
        &animation(50.0, 60, 32, 5),
    )
    .unwrap();

    // 5 frames with a 20ms budget each
    assert!(start.elapsed() >= Duration::from_millis(90), "{:?}", start.elapsed());

    let messages = handle.join().unwrap();
    assert_eq!(messages.len(), 5);
    assert!(messages.iter().all(|x| x.payload.len() == 60 * 32 * 3));
}

#[test_log::test]
fn test_zero_frame_rate_never_connects() {
    let (server, _handle) = fake_server();

    let err = run_animation(ScanPattern::default(), &server, &animation(0.0, 6, 4, 1)).unwrap_err();

    assert!(err.to_string().contains("frame rate"), "{err}");
}

#[test_log::test]
fn test_oversized_frame_never_connects() {
    let (server, _handle) = fake_server();

    // 200 * 200 * 3 bytes is more than one message can hold
    let err = run_animation(ScanPattern::default(), &server, &animation(60.0, 200, 200, 1)).unwrap_err();

    assert!(err.to_string().contains("does not fit"), "{err}");
}

#[test_log::test]
fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = ServerArgs {
        server: None,
        ip: addr.ip().to_string(),
        port: addr.port(),
    };

    assert!(run_animation(ScanPattern::default(), &server, &animation(60.0, 6, 4, 1)).is_err());
}

#[test_log::test]
fn test_update_settings() {
    let (server, handle) = fake_server();

    let settings = SettingsCli {
        server,
        brightness: 0.25,
        dithering: false,
        no_dithering: true,
    };

    apply_settings(&settings).unwrap();

    let messages = handle.join().unwrap();
    assert_eq!(messages.len(), 2);

    assert_eq!(
        messages[0].sysex(),
        Some((
            SYSEX_SYSTEM_ID,
            SYSEX_SET_BRIGHTNESS,
            &0.25f32.to_be_bytes()[..]
        ))
    );
    assert_eq!(
        messages[1].sysex(),
        Some((
            SYSEX_SYSTEM_ID,
            SYSEX_FIRMWARE_CONFIG,
            &[FIRMWARE_CONFIG_NO_DITHERING][..]
        ))
    );
}
