pub mod identity_toolkit;
