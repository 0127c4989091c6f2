pub mod blinker;
pub mod button_handler;
pub mod led_chase;
pub mod sequencer;
pub mod serial_console;
pub mod stepper;

pub use blinker::Blinker;
pub use button_handler::{ButtonEvent, ButtonHandler, Debouncer};
pub use led_chase::{ChaseButtons, ChaseSequencer};
pub use sequencer::{Direction, Executor, IdleOutput, OutputNibble, Sequencer};
pub use serial_console::SerialConsole;
pub use stepper::StepperSequencer;
