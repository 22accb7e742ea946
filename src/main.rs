//! Embedded shell for the wxface watchface (nRF52840 + SoftDevice S140).
//!
//! All logic lives in the `wxface` library; this binary only wires it
//! to the hardware: a minute ticker, the SSD1306 face over I²C, and a
//! GATT service carrying the message channel to the phone companion.

#![no_std]
#![no_main]

// Panic handler and debugging
use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use core::mem;

use chrono::{NaiveDateTime, Timelike};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    interrupt::Priority,
    peripherals::TWISPI0,
    twim::{self, Twim},
};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;

use wxface::clock::ClockStyle;
use wxface::config::{BLE_DEVICE_NAME, CLOCK_24H, MAX_INBOUND_PAYLOAD, TIMEZONE_OFFSET_SECS};
use wxface::error::Error;
use wxface::msg;
use wxface::state::{ChannelEvent, HostChannel, WatchfaceState};
use wxface::ui::screen;

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<TWISPI0>;
});

/// Events flowing from the BLE task to the face task.
enum FaceEvent {
    Message(Vec<u8, MAX_INBOUND_PAYLOAD>),
    Dropped,
    SentOk,
    SendFailed,
}

static EVENTS: Channel<ThreadModeRawMutex, FaceEvent, 4> = Channel::new();
static OUTBOX: Channel<ThreadModeRawMutex, [u8; 4], 2> = Channel::new();

/// `HostChannel` backed by the BLE outbox queue.
struct BleChannel;

impl HostChannel for BleChannel {
    fn send_weather_request(&mut self) -> Result<(), Error> {
        OUTBOX
            .try_send(msg::weather_request())
            .map_err(|_| Error::SendFailed)
    }
}

#[nrf_softdevice::gatt_server]
struct Server {
    face: CompanionService,
}

/// Message channel to the phone companion: the phone writes weather
/// payloads to `inbound`; the watch notifies the request trigger on
/// `outbound`.
#[nrf_softdevice::gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e")]
struct CompanionService {
    #[characteristic(uuid = "6e400002-b5a3-f393-e0a9-e50e24dcca9e", write)]
    inbound: Vec<u8, MAX_INBOUND_PAYLOAD>,
    #[characteristic(uuid = "6e400003-b5a3-f393-e0a9-e50e24dcca9e", notify)]
    outbound: Vec<u8, 8>,
}

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name("wxface")
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Wall-clock time: build-time epoch plus uptime plus timezone offset.
/// Good enough until the companion protocol grows a time service.
fn wall_clock_now() -> NaiveDateTime {
    let epoch = UTC_EPOCH + Instant::now().as_secs() as i64 + TIMEZONE_OFFSET_SECS as i64;
    unwrap!(NaiveDateTime::from_timestamp_opt(epoch, 0))
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve the companion connection, and pump queued weather
/// requests out as notifications.
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    loop {
        let config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(err) => {
                defmt::error!("advertising failed: {:?}", err);
                continue;
            }
        };
        info!("companion connected");

        let gatt = gatt_server::run(&conn, server, |event| match event {
            ServerEvent::Face(CompanionServiceEvent::InboundWrite(payload)) => {
                if EVENTS.try_send(FaceEvent::Message(payload)).is_err() {
                    // Queue full - the message is lost, same as a
                    // transport-level drop.
                    let _ = EVENTS.try_send(FaceEvent::Dropped);
                }
            }
            ServerEvent::Face(CompanionServiceEvent::OutboundCccdWrite { notifications }) => {
                info!(
                    "request notifications {}",
                    if notifications { "on" } else { "off" }
                );
            }
        });

        let pump = async {
            loop {
                let request = OUTBOX.receive().await;
                let payload: Vec<u8, 8> = unwrap!(Vec::from_slice(&request));
                let event = match server.face.outbound_notify(&conn, &payload) {
                    Ok(()) => FaceEvent::SentOk,
                    Err(_) => FaceEvent::SendFailed,
                };
                let _ = EVENTS.try_send(event);
            }
        };

        select(gatt, pump).await;
        info!("companion disconnected");
    }
}

/// Own the watchface state: tick once per wall-clock minute, fold in
/// channel events, and redraw the face after every change.
#[embassy_executor::task]
async fn face_task(mut display: screen::Display<Twim<'static, TWISPI0>>) -> ! {
    let clock_style = if CLOCK_24H {
        ClockStyle::H24
    } else {
        ClockStyle::H12
    };
    let mut state = WatchfaceState::new(clock_style);
    let mut channel = BleChannel;
    let mut last_minute = None;

    loop {
        let now = wall_clock_now();
        let minute_of_day = now.time().hour() * 60 + now.time().minute();
        if last_minute != Some(minute_of_day) {
            last_minute = Some(minute_of_day);
            match state.on_minute_tick(now, &mut channel) {
                Ok(true) => info!("weather request queued"),
                Ok(false) => {}
                Err(_) => defmt::error!("Outbox send failed!"),
            }
            screen::draw_face(&mut display, &state);
        }

        // Sleep until the next wall-clock minute, but wake early for
        // channel traffic.
        let wait_secs = 60 - u64::from(now.time().second()).min(59);
        let tick = Timer::after(Duration::from_secs(wait_secs));

        if let Either::Second(event) = select(tick, EVENTS.receive()).await {
            match event {
                FaceEvent::Message(payload) => {
                    if let Some(summary) = state.on_channel_event(ChannelEvent::Received(&payload))
                    {
                        if summary.unknown > 0 {
                            defmt::warn!(
                                "{} unrecognized key(s), last {}",
                                summary.unknown,
                                summary.last_unknown_key
                            );
                        }
                        if summary.truncated {
                            defmt::warn!("weather value truncated to fit");
                        }
                    }
                    screen::draw_face(&mut display, &state);
                }
                FaceEvent::Dropped => {
                    state.on_channel_event(ChannelEvent::Dropped);
                    defmt::error!("Message dropped!");
                }
                FaceEvent::SentOk => {
                    state.on_channel_event(ChannelEvent::SentOk);
                    info!("Outbox send success!");
                }
                FaceEvent::SendFailed => {
                    state.on_channel_event(ChannelEvent::SendFailed);
                    defmt::error!("Outbox send failed!");
                }
            }
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = embassy_nrf::config::Config::default();
    // The SoftDevice owns the two highest interrupt priority levels.
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    info!("Initializing");

    // I²C for the OLED face
    let i2c_config = twim::Config::default();
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let display = screen::init(i2c);

    let sd = Softdevice::enable(&softdevice_config());
    static SERVER: StaticCell<Server> = StaticCell::new();
    let server = SERVER.init(unwrap!(Server::new(sd)));

    info!("Initialization finished");

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(face_task(display)));
}
