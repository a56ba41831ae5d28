//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in lather-core, on top of `embedded-hal` digital pins:
//!
//! - Relay bank for motor, valves and pumps
//! - Buzzer edge detection
//! - Button debouncing
//! - Float-switch water level probe
//! - [`Hal`] bundle tying them to the core's traits

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod buzzer;
pub mod hal;
pub mod level;
pub mod polarity;
pub mod relay;

pub use button::{Button, Buttons, Debouncer, DEBOUNCE_MS};
pub use buzzer::BuzzerEdge;
pub use hal::Hal;
pub use level::{LevelProbe, ProbeError, ProbeInput};
pub use polarity::Polarity;
pub use relay::{Relay, RelayBank, RelayConfig, RelayError};

#[cfg(test)]
pub(crate) mod mock {
    //! Mock pins for driver tests

    use core::convert::Infallible;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

    /// Global write counter ordering writes across pins
    static SEQ: AtomicU32 = AtomicU32::new(1);

    fn stamp() -> u32 {
        SEQ.fetch_add(1, Ordering::Relaxed)
    }

    /// Output pin remembering its level and when it was last driven each way
    #[derive(Debug, Default)]
    pub struct MockOutput {
        pub high: bool,
        pub rose_at: u32,
        pub fell_at: u32,
    }

    impl ErrorType for MockOutput {
        type Error = Infallible;
    }

    impl OutputPin for MockOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.fell_at = stamp();
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.rose_at = stamp();
            Ok(())
        }
    }

    /// Input pin with a fixed level
    #[derive(Debug, Default, Clone, Copy)]
    pub struct MockInput {
        pub high: bool,
    }

    impl MockInput {
        pub fn new(high: bool) -> Self {
            Self { high }
        }
    }

    impl ErrorType for MockInput {
        type Error = Infallible;
    }

    impl InputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    /// Pin error kind used by failing mocks
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Broken;

    impl embedded_hal::digital::Error for Broken {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    /// Output pin that always fails
    #[derive(Debug, Default)]
    pub struct BrokenOutput;

    impl ErrorType for BrokenOutput {
        type Error = Broken;
    }

    impl OutputPin for BrokenOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(Broken)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(Broken)
        }
    }

    /// Input pin that always fails
    #[derive(Debug, Default)]
    pub struct BrokenInput;

    impl ErrorType for BrokenInput {
        type Error = Broken;
    }

    impl InputPin for BrokenInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(Broken)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(Broken)
        }
    }
}
