//! Simulated two-wire bus with an MLX90614 slave
//!
//! The master side is a pair of fake pins and a fake delay that all record
//! into one [`Bus`]. The slave reacts to clock edges the way a real device
//! does: it samples SDA on rising SCL, changes its own SDA drive only while
//! SCL is low, and recognises START/STOP as SDA edges while SCL is high.
//! SDA is the wired-AND of both sides.

use core::cell::RefCell;

use heapless::Vec;
use mlx_core::pec::pec;
use mlx_hal::{Delay, FlexPin, InputPin, OutputPin};

pub const LOG_CAPACITY: usize = 4096;

/// What the master did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// SCL driven to a level
    Scl(bool),
    /// SDA released (`true`) or driven low (`false`)
    Sda(bool),
    /// One wait unit
    Wait,
    /// SDA sampled
    Sample,
    DelayUs(u32),
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ignore,
    Rx,
    RxAck,
    Tx,
    TxAck,
    Done,
}

pub struct Slave {
    pub address: u8,
    pub memory: [u16; 256],
    pub nack_all: bool,
    pub corrupt_pec: bool,
    pub readback: Option<u16>,
    pub stuck_low: bool,
    pub commands: Vec<u8, 8>,
    /// Write Word frames committed to memory
    pub writes: u32,
    pub master_acks: Vec<bool, 8>,
    pub starts: u32,
    pub stops: u32,
    pub phase: Phase,
    expect_address: bool,
    reading: bool,
    shift: u8,
    bits: u8,
    frame: Vec<u8, 8>,
    tx: [u8; 3],
    tx_index: usize,
    acked: bool,
    drive_low: bool,
}

impl Slave {
    fn new(address: u8) -> Self {
        Self {
            address,
            memory: [0; 256],
            nack_all: false,
            corrupt_pec: false,
            readback: None,
            stuck_low: false,
            commands: Vec::new(),
            writes: 0,
            master_acks: Vec::new(),
            starts: 0,
            stops: 0,
            phase: Phase::Idle,
            expect_address: false,
            reading: false,
            shift: 0,
            bits: 0,
            frame: Vec::new(),
            tx: [0; 3],
            tx_index: 0,
            acked: false,
            drive_low: false,
        }
    }

    fn tx_byte(&self) -> u8 {
        self.tx.get(self.tx_index).copied().unwrap_or(0xFF)
    }

    fn on_start(&mut self) {
        self.starts += 1;
        self.phase = Phase::Rx;
        self.expect_address = true;
        self.shift = 0;
        self.bits = 0;
        self.drive_low = false;
    }

    fn on_stop(&mut self) {
        self.stops += 1;
        if !self.reading && self.frame.first() == Some(&(self.address << 1)) {
            let valid = |frame: &[u8]| pec(&frame[..frame.len() - 1]) == frame[frame.len() - 1];
            match *self.frame.as_slice() {
                [_, reg, lo, hi, _] if valid(&self.frame) => {
                    self.memory[reg as usize] = u16::from_le_bytes([lo, hi]);
                    self.writes += 1;
                }
                [_, cmd, _] if valid(&self.frame) => {
                    self.commands.push(cmd).unwrap();
                }
                _ => {}
            }
        }
        self.frame.clear();
        self.reading = false;
        self.phase = Phase::Idle;
        self.drive_low = false;
    }

    fn prepare_read(&mut self) {
        let command = self.frame.get(1).copied().unwrap_or(0);
        let aw = self.address << 1;
        let [lo, hi] = self
            .readback
            .unwrap_or(self.memory[command as usize])
            .to_le_bytes();
        let code = pec(&[aw, command, aw | 1, lo, hi]);
        self.tx = [lo, hi, if self.corrupt_pec { code ^ 0xFF } else { code }];
        self.tx_index = 0;
        self.master_acks.clear();
    }

    fn on_scl_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Rx => {
                self.shift = (self.shift << 1) | sda as u8;
                self.bits += 1;
            }
            Phase::TxAck => {
                self.acked = !sda;
                self.master_acks.push(self.acked).unwrap();
            }
            _ => {}
        }
    }

    fn on_scl_fall(&mut self) {
        match self.phase {
            Phase::Rx if self.bits == 8 => {
                let byte = self.shift;
                if self.expect_address {
                    self.expect_address = false;
                    if self.nack_all || byte >> 1 != self.address {
                        self.phase = Phase::Ignore;
                        self.drive_low = false;
                        return;
                    }
                    if byte & 0x01 != 0 {
                        self.reading = true;
                        self.frame.push(byte).unwrap();
                        self.prepare_read();
                        self.drive_low = true;
                        self.phase = Phase::RxAck;
                        return;
                    }
                }
                self.frame.push(byte).unwrap();
                self.drive_low = true;
                self.phase = Phase::RxAck;
            }
            Phase::RxAck => {
                if self.reading {
                    self.phase = Phase::Tx;
                    self.bits = 0;
                    self.drive_low = self.tx_byte() & 0x80 == 0;
                } else {
                    self.phase = Phase::Rx;
                    self.bits = 0;
                    self.shift = 0;
                    self.drive_low = false;
                }
            }
            Phase::Tx => {
                self.bits += 1;
                if self.bits == 8 {
                    self.drive_low = false;
                    self.phase = Phase::TxAck;
                } else {
                    self.drive_low = (self.tx_byte() << self.bits) & 0x80 == 0;
                }
            }
            Phase::TxAck => {
                if self.acked {
                    self.tx_index += 1;
                    self.bits = 0;
                    self.phase = Phase::Tx;
                    self.drive_low = self.tx_byte() & 0x80 == 0;
                } else {
                    self.phase = Phase::Done;
                    self.drive_low = false;
                }
            }
            _ => {}
        }
    }
}

pub struct Bus {
    pub scl: bool,
    master_low: bool,
    pub slave: Slave,
    pub log: Vec<Event, LOG_CAPACITY>,
    pub last_spin: Option<u32>,
}

impl Bus {
    /// Idle bus with a slave at `address`
    pub fn new(address: u8) -> RefCell<Self> {
        RefCell::new(Self {
            scl: true,
            master_low: false,
            slave: Slave::new(address),
            log: Vec::new(),
            last_spin: None,
        })
    }

    /// Line level of SDA
    pub fn sda(&self) -> bool {
        !(self.master_low || self.slave.drive_low || self.slave.stuck_low)
    }

    pub fn record(&mut self, event: Event) {
        self.log.push(event).unwrap();
    }

    /// Master drives SCL
    pub fn set_scl(&mut self, high: bool) {
        self.record(Event::Scl(high));
        if high == self.scl {
            return;
        }
        self.scl = high;
        if high {
            let sda = self.sda();
            self.slave.on_scl_rise(sda);
        } else {
            self.slave.on_scl_fall();
        }
    }

    /// Master drives SDA low (`true`) or lets go of it
    pub fn set_master_low(&mut self, low: bool) {
        self.record(Event::Sda(!low));
        let before = self.sda();
        self.master_low = low;
        let after = self.sda();
        if self.scl && before != after {
            if after {
                self.slave.on_stop();
            } else {
                self.slave.on_start();
            }
        }
    }

    /// Number of times `event` was recorded
    pub fn count(&self, event: Event) -> usize {
        self.log.iter().filter(|e| **e == event).count()
    }
}

pub struct SimScl<'a>(pub &'a RefCell<Bus>);

impl OutputPin for SimScl<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().set_scl(true);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().set_scl(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().scl
    }
}

pub struct SimSda<'a> {
    bus: &'a RefCell<Bus>,
    latch_high: bool,
    output: bool,
}

impl<'a> SimSda<'a> {
    pub fn new(bus: &'a RefCell<Bus>) -> Self {
        Self {
            bus,
            latch_high: true,
            output: false,
        }
    }
}

impl OutputPin for SimSda<'_> {
    fn set_high(&mut self) {
        self.latch_high = true;
        if self.output {
            self.bus.borrow_mut().set_master_low(false);
        }
    }

    fn set_low(&mut self) {
        self.latch_high = false;
        if self.output {
            self.bus.borrow_mut().set_master_low(true);
        }
    }

    fn is_set_high(&self) -> bool {
        self.latch_high
    }
}

impl InputPin for SimSda<'_> {
    fn is_high(&mut self) -> bool {
        let mut bus = self.bus.borrow_mut();
        bus.record(Event::Sample);
        bus.sda()
    }
}

impl FlexPin for SimSda<'_> {
    fn set_as_input(&mut self) {
        self.output = false;
        self.bus.borrow_mut().set_master_low(false);
    }

    fn set_as_output(&mut self) {
        self.output = true;
        self.bus.borrow_mut().set_master_low(!self.latch_high);
    }

    fn is_output(&self) -> bool {
        self.output
    }

    // One event per call, not one per latch/direction step
    fn release(&mut self) {
        self.output = false;
        self.bus.borrow_mut().set_master_low(false);
    }

    fn drive_low(&mut self) {
        self.latch_high = false;
        self.output = true;
        self.bus.borrow_mut().set_master_low(true);
    }
}

pub struct SimDelay<'a>(pub &'a RefCell<Bus>);

impl Delay for SimDelay<'_> {
    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().record(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().record(Event::DelayMs(ms));
    }

    fn spin(&mut self, iterations: u32) {
        let mut bus = self.0.borrow_mut();
        bus.last_spin = Some(iterations);
        bus.record(Event::Wait);
    }
}
