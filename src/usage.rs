//! HID usage IDs for the Keyboard/Keypad, Consumer and Generic Desktop
//! (system control) pages, plus the range checks the devices use to decide
//! which keys they accept.

/// Keyboard/Keypad page (0x07) usages.
pub mod keyboard {
    pub const NO_EVENT: u8 = 0x00;
    pub const ERROR_ROLL_OVER: u8 = 0x01;
    pub const POST_FAIL: u8 = 0x02;
    pub const ERROR_UNDEFINED: u8 = 0x03;

    pub const KEY_A: u8 = 0x04;
    pub const KEY_B: u8 = 0x05;
    pub const KEY_C: u8 = 0x06;
    pub const KEY_D: u8 = 0x07;
    pub const KEY_E: u8 = 0x08;
    pub const KEY_F: u8 = 0x09;
    pub const KEY_G: u8 = 0x0A;
    pub const KEY_H: u8 = 0x0B;
    pub const KEY_I: u8 = 0x0C;
    pub const KEY_J: u8 = 0x0D;
    pub const KEY_K: u8 = 0x0E;
    pub const KEY_L: u8 = 0x0F;
    pub const KEY_M: u8 = 0x10;
    pub const KEY_N: u8 = 0x11;
    pub const KEY_O: u8 = 0x12;
    pub const KEY_P: u8 = 0x13;
    pub const KEY_Q: u8 = 0x14;
    pub const KEY_R: u8 = 0x15;
    pub const KEY_S: u8 = 0x16;
    pub const KEY_T: u8 = 0x17;
    pub const KEY_U: u8 = 0x18;
    pub const KEY_V: u8 = 0x19;
    pub const KEY_W: u8 = 0x1A;
    pub const KEY_X: u8 = 0x1B;
    pub const KEY_Y: u8 = 0x1C;
    pub const KEY_Z: u8 = 0x1D;

    pub const KEY_1: u8 = 0x1E;
    pub const KEY_2: u8 = 0x1F;
    pub const KEY_3: u8 = 0x20;
    pub const KEY_4: u8 = 0x21;
    pub const KEY_5: u8 = 0x22;
    pub const KEY_6: u8 = 0x23;
    pub const KEY_7: u8 = 0x24;
    pub const KEY_8: u8 = 0x25;
    pub const KEY_9: u8 = 0x26;
    pub const KEY_0: u8 = 0x27;

    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2A;
    pub const TAB: u8 = 0x2B;
    pub const SPACEBAR: u8 = 0x2C;
    pub const MINUS: u8 = 0x2D;
    pub const EQUALS: u8 = 0x2E;
    pub const LEFT_BRACKET: u8 = 0x2F;
    pub const RIGHT_BRACKET: u8 = 0x30;
    pub const BACKSLASH: u8 = 0x31;
    pub const NON_US_POUND: u8 = 0x32;
    pub const SEMICOLON: u8 = 0x33;
    pub const QUOTE: u8 = 0x34;
    pub const GRAVE: u8 = 0x35;
    pub const COMMA: u8 = 0x36;
    pub const PERIOD: u8 = 0x37;
    pub const SLASH: u8 = 0x38;
    pub const CAPS_LOCK: u8 = 0x39;

    pub const F1: u8 = 0x3A;
    pub const F2: u8 = 0x3B;
    pub const F3: u8 = 0x3C;
    pub const F4: u8 = 0x3D;
    pub const F5: u8 = 0x3E;
    pub const F6: u8 = 0x3F;
    pub const F7: u8 = 0x40;
    pub const F8: u8 = 0x41;
    pub const F9: u8 = 0x42;
    pub const F10: u8 = 0x43;
    pub const F11: u8 = 0x44;
    pub const F12: u8 = 0x45;

    pub const PRINT_SCREEN: u8 = 0x46;
    pub const SCROLL_LOCK: u8 = 0x47;
    pub const PAUSE: u8 = 0x48;
    pub const INSERT: u8 = 0x49;
    pub const HOME: u8 = 0x4A;
    pub const PAGE_UP: u8 = 0x4B;
    pub const DELETE: u8 = 0x4C;
    pub const END: u8 = 0x4D;
    pub const PAGE_DOWN: u8 = 0x4E;
    pub const RIGHT_ARROW: u8 = 0x4F;
    pub const LEFT_ARROW: u8 = 0x50;
    pub const DOWN_ARROW: u8 = 0x51;
    pub const UP_ARROW: u8 = 0x52;

    pub const NUM_LOCK: u8 = 0x53;
    pub const KEYPAD_DIVIDE: u8 = 0x54;
    pub const KEYPAD_MULTIPLY: u8 = 0x55;
    pub const KEYPAD_SUBTRACT: u8 = 0x56;
    pub const KEYPAD_ADD: u8 = 0x57;
    pub const KEYPAD_ENTER: u8 = 0x58;
    pub const KEYPAD_1: u8 = 0x59;
    pub const KEYPAD_2: u8 = 0x5A;
    pub const KEYPAD_3: u8 = 0x5B;
    pub const KEYPAD_4: u8 = 0x5C;
    pub const KEYPAD_5: u8 = 0x5D;
    pub const KEYPAD_6: u8 = 0x5E;
    pub const KEYPAD_7: u8 = 0x5F;
    pub const KEYPAD_8: u8 = 0x60;
    pub const KEYPAD_9: u8 = 0x61;
    pub const KEYPAD_0: u8 = 0x62;
    pub const KEYPAD_PERIOD: u8 = 0x63;
    pub const NON_US_BACKSLASH: u8 = 0x64;
    pub const APPLICATION: u8 = 0x65;
    pub const POWER: u8 = 0x66;
    pub const KEYPAD_EQUALS: u8 = 0x67;

    pub const F13: u8 = 0x68;
    pub const F14: u8 = 0x69;
    pub const F15: u8 = 0x6A;
    pub const F16: u8 = 0x6B;
    pub const F17: u8 = 0x6C;
    pub const F18: u8 = 0x6D;
    pub const F19: u8 = 0x6E;
    pub const F20: u8 = 0x6F;
    pub const F21: u8 = 0x70;
    pub const F22: u8 = 0x71;
    pub const F23: u8 = 0x72;
    pub const F24: u8 = 0x73;

    pub const EXECUTE: u8 = 0x74;
    pub const HELP: u8 = 0x75;
    pub const MENU: u8 = 0x76;
    pub const SELECT: u8 = 0x77;
    pub const STOP: u8 = 0x78;
    pub const AGAIN: u8 = 0x79;
    pub const UNDO: u8 = 0x7A;
    pub const CUT: u8 = 0x7B;
    pub const COPY: u8 = 0x7C;
    pub const PASTE: u8 = 0x7D;
    pub const FIND: u8 = 0x7E;
    pub const MUTE: u8 = 0x7F;
    pub const VOLUME_UP: u8 = 0x80;
    pub const VOLUME_DOWN: u8 = 0x81;

    pub const INTERNATIONAL_1: u8 = 0x87;
    pub const INTERNATIONAL_2: u8 = 0x88;
    pub const INTERNATIONAL_3: u8 = 0x89;
    pub const LANG_1: u8 = 0x90;
    pub const LANG_2: u8 = 0x91;

    pub const KEYPAD_HEXADECIMAL: u8 = 0xDD;

    pub const LEFT_CONTROL: u8 = 0xE0;
    pub const LEFT_SHIFT: u8 = 0xE1;
    pub const LEFT_ALT: u8 = 0xE2;
    pub const LEFT_GUI: u8 = 0xE3;
    pub const RIGHT_CONTROL: u8 = 0xE4;
    pub const RIGHT_SHIFT: u8 = 0xE5;
    pub const RIGHT_ALT: u8 = 0xE6;
    pub const RIGHT_GUI: u8 = 0xE7;
}

/// Consumer page (0x0C) usages.
pub mod consumer {
    pub const POWER: u16 = 0x0030;
    pub const SLEEP: u16 = 0x0032;
    pub const MENU: u16 = 0x0040;
    pub const BRIGHTNESS_UP: u16 = 0x006F;
    pub const BRIGHTNESS_DOWN: u16 = 0x0070;
    pub const PLAY: u16 = 0x00B0;
    pub const PAUSE: u16 = 0x00B1;
    pub const RECORD: u16 = 0x00B2;
    pub const FAST_FORWARD: u16 = 0x00B3;
    pub const REWIND: u16 = 0x00B4;
    pub const SCAN_NEXT_TRACK: u16 = 0x00B5;
    pub const SCAN_PREVIOUS_TRACK: u16 = 0x00B6;
    pub const STOP: u16 = 0x00B7;
    pub const EJECT: u16 = 0x00B8;
    pub const PLAY_PAUSE: u16 = 0x00CD;
    pub const MUTE: u16 = 0x00E2;
    pub const VOLUME_INCREMENT: u16 = 0x00E9;
    pub const VOLUME_DECREMENT: u16 = 0x00EA;
    pub const AL_CONSUMER_CONTROL_CONFIGURATION: u16 = 0x0183;
    pub const AL_EMAIL_READER: u16 = 0x018A;
    pub const AL_CALCULATOR: u16 = 0x0192;
    pub const AL_LOCAL_BROWSER: u16 = 0x0194;
    pub const AC_SEARCH: u16 = 0x0221;
    pub const AC_HOME: u16 = 0x0223;
    pub const AC_BACK: u16 = 0x0224;
    pub const AC_FORWARD: u16 = 0x0225;
    pub const AC_STOP: u16 = 0x0226;
    pub const AC_REFRESH: u16 = 0x0227;
    pub const AC_BOOKMARKS: u16 = 0x022A;

    /// Highest usage the consumer report descriptor declares.
    pub const MAX: u16 = 0x03FF;
}

/// Generic Desktop page (0x01) system control usages.
pub mod system {
    pub const POWER_DOWN: u8 = 0x81;
    pub const SLEEP: u8 = 0x82;
    pub const WAKE_UP: u8 = 0x83;
    pub const CONTEXT_MENU: u8 = 0x84;
    pub const MAIN_MENU: u8 = 0x85;
    pub const APP_MENU: u8 = 0x86;
    pub const MENU_HELP: u8 = 0x87;
    pub const MENU_EXIT: u8 = 0x88;
    pub const MENU_SELECT: u8 = 0x89;
    pub const MENU_RIGHT: u8 = 0x8A;
    pub const MENU_LEFT: u8 = 0x8B;
    pub const MENU_UP: u8 = 0x8C;
    pub const MENU_DOWN: u8 = 0x8D;
    pub const COLD_RESTART: u8 = 0x8E;
    pub const WARM_RESTART: u8 = 0x8F;
    pub const DPAD_UP: u8 = 0x90;
    pub const DPAD_DOWN: u8 = 0x91;
    pub const DPAD_RIGHT: u8 = 0x92;
    pub const DPAD_LEFT: u8 = 0x93;
    pub const DOCK: u8 = 0xA0;
    pub const UNDOCK: u8 = 0xA1;
    pub const SETUP: u8 = 0xA2;
    pub const BREAK: u8 = 0xA3;
    pub const DEBUGGER_BREAK: u8 = 0xA4;
    pub const APPLICATION_BREAK: u8 = 0xA5;
    pub const APPLICATION_DEBUGGER_BREAK: u8 = 0xA6;
    pub const SPEAKER_MUTE: u8 = 0xA7;
    pub const HIBERNATE: u8 = 0xA8;
    pub const DISPLAY_INVERT: u8 = 0xB0;
    pub const DISPLAY_INTERNAL: u8 = 0xB1;
    pub const DISPLAY_EXTERNAL: u8 = 0xB2;
    pub const DISPLAY_BOTH: u8 = 0xB3;
    pub const DISPLAY_DUAL: u8 = 0xB4;
    pub const DISPLAY_TOGGLE_INT_EXT: u8 = 0xB5;
    pub const DISPLAY_SWAP_PRIMARY_SECONDARY: u8 = 0xB6;
    pub const DISPLAY_LCD_AUTOSCALE: u8 = 0xB7;

    pub const MIN: u8 = POWER_DOWN;
    pub const MAX: u8 = DISPLAY_LCD_AUTOSCALE;
}

/// Keys a keyboard report can carry as a regular (non-modifier) key.
pub const fn is_printable(key: u8) -> bool {
    key <= keyboard::KEYPAD_HEXADECIMAL
}

/// Left Control through Right GUI.
pub const fn is_modifier(key: u8) -> bool {
    key >= keyboard::LEFT_CONTROL && key <= keyboard::RIGHT_GUI
}

/// Non-zero usage on the consumer page.
pub const fn is_consumer_control(usage: u16) -> bool {
    usage != 0 && usage <= consumer::MAX
}

/// Usage in the system control range.
pub const fn is_system_control(key: u8) -> bool {
    key >= system::MIN && key <= system::MAX
}
