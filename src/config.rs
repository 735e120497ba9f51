// Config controls how a Message is packed. Unpacking has no knobs: compressed
// names are always followed, wherever they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // compression enables label compression. When disabled no pointers are
    // emitted and every name is written in full.
    pub compression: bool,

    // compress_srv_target allows the SRV target name to be written as a
    // pointer (and to be pointed at). RFC 2782 asks for it to stay
    // uncompressed, so this is off by default.
    pub compress_srv_target: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            compression: true,
            compress_srv_target: false,
        }
    }
}
