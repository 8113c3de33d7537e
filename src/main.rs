// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use sentry_rover::{
    config::Profile,
    control::ControlLoop,
    drivers::{EchoTimes, Ranger, Stepper, Trigger},
    hw::{
        exti,
        timer::{self, micros},
        usart, BoardPins, DwtDelay, Output, TimerStep, UsartRx,
    },
    log_info,
    motors::Drivetrain,
    protocol::{RxPump, RX_CAPACITY},
};
use heapless::spsc::Queue;

const PROFILE: Profile = Profile::selected();

/// Echo timing, written from `EXTI9_5`, read by the control loop.
static ECHOES: EchoTimes = EchoTimes::new();

type EchoRanger = Ranger<'static, Output, DwtDelay>;
type CommandRx = RxPump<'static, UsartRx<pac::USART1>, RX_CAPACITY>;

// Handed over once to the handler that owns it from then on.
static RANGER: Mutex<RefCell<Option<EchoRanger>>> = Mutex::new(RefCell::new(None));
static COMMAND_RX: Mutex<RefCell<Option<CommandRx>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let mut dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let mut apb2 = rcc.apb2;
    let clocks = rcc.cfgr.freeze();
    let sysclk_hz = clocks.sysclk().raw();
    let timclk_hz = clocks.timclk1().raw();

    cp.DCB.enable_trace();
    cp.DWT.enable_cycle_counter();
    let mut delay = DwtDelay::new(sysclk_hz);

    // Echo timestamps
    timer::start_tim2(dp.TIM2, timclk_hz);

    // GPIO
    let pins = BoardPins::new(
        dp.GPIOA,
        dp.GPIOD,
        dp.GPIOE,
        &mut dp.SYSCFG,
        &mut dp.EXTI,
        &mut apb2,
    );

    // USART1 (command link)
    let usart_cfg = Config {
        baud_rate: PROFILE.baud_rate.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let (mut tx, rx) = usart::split(serial);
    tx.println("sentry-rover ready");

    let queue: &'static mut Queue<u8, RX_CAPACITY> =
        cortex_m::singleton!(: Queue<u8, RX_CAPACITY> = Queue::new()).unwrap();
    let (producer, consumer) = queue.split();
    cortex_m::interrupt::free(|cs| {
        COMMAND_RX
            .borrow(cs)
            .replace(Some(RxPump::new(rx, producer)))
    });

    // Drive
    let left = Stepper::new(
        pins.left.enable,
        pins.left.dir,
        TimerStep::tim3(dp.TIM3, timclk_hz, PROFILE.step_pulse_us),
        PROFILE.settle_delay_us,
    );
    let right = Stepper::new(
        pins.right.enable,
        pins.right.dir,
        TimerStep::tim4(dp.TIM4, timclk_hz, PROFILE.step_pulse_us),
        PROFILE.settle_delay_us,
    );
    let trigger = Trigger::new(pins.gun, PROFILE.trigger_active);
    let mut drivetrain = Drivetrain::new(
        left,
        right,
        trigger,
        delay,
        PROFILE.speed,
        PROFILE.stop_policy,
    );
    if PROFILE.drive_enabled_at_start {
        drivetrain.enable_all();
    }

    // Ranging
    let ranger = Ranger::new(pins.triggers, &ECHOES, delay, PROFILE.trigger_pulse_us);
    cortex_m::interrupt::free(|cs| RANGER.borrow(cs).replace(Some(ranger)));

    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(sysclk_hz / 1_000 * PROFILE.ranging_period_ms - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    unsafe {
        NVIC::unmask(pac::Interrupt::EXTI9_5);
        NVIC::unmask(pac::Interrupt::USART1);
    }

    log_info!("control loop starting, framing {:?}", PROFILE.framing);

    ControlLoop::new(consumer, drivetrain, &ECHOES, PROFILE).run(&mut delay)
}

#[exception]
fn SysTick() {
    static mut LOCAL: Option<EchoRanger> = None;

    // Echo edges must never be masked while the trigger pulses run.
    if LOCAL.is_none() {
        *LOCAL = cortex_m::interrupt::free(|cs| RANGER.borrow(cs).take());
    }
    if let Some(ranger) = LOCAL.as_mut() {
        ranger.tick();
    }
}

#[interrupt]
fn USART1() {
    static mut LOCAL: Option<CommandRx> = None;

    if LOCAL.is_none() {
        *LOCAL = cortex_m::interrupt::free(|cs| COMMAND_RX.borrow(cs).take());
    }
    if let Some(pump) = LOCAL.as_mut() {
        pump.service();
    }
}

#[interrupt]
fn EXTI9_5() {
    exti::dispatch(|channel, rising| ECHOES.on_edge(channel, rising, micros()));
}
