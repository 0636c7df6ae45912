/*!
Carousel runtime options.

This module turns widget settings into the options object the carousel script
reads from the `data-options` attribute:
- `builder`: breakpoint table and scalar options, including the rules between
  interdependent switches (rewind vs. loop, autoplay-dependent options, dots).
- `animations`: entry/exit animation catalogs.

Example:
```
use owce::carousel;
use owce::settings::SettingsBag;
use serde_json::json;

let bag = SettingsBag::from_value(json!({"rewind": "yes", "enable_loop": "yes"})).unwrap();
let options = carousel::build(&bag);
assert!(options.rewind);
assert!(options.responsive.entries().iter().all(|e| !e.loop_));
```
*/

pub mod animations;
pub mod builder;

pub use animations::{AnimationGroup, AnimationPhase, ENTRY_ANIMATIONS, EXIT_ANIMATIONS};
pub use builder::{BreakpointEntry, BreakpointTable, CarouselConfig, NAV_TEXT, SLIDE_TRANSITION, build, build_from_settings};
