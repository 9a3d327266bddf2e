use clap::Clap;

pub mod accelerators;
pub mod core;
pub mod integrators;
pub mod shapes;

cfg_if::cfg_if! {
   if #[cfg(feature = "float64")] {
        pub type Float = f64;
        pub const PI: f64 = std::f64::consts::PI;
   } else {
        pub type Float = f32;
        pub const PI: f32 = std::f32::consts::PI;
   }
}

#[derive(Clap, Debug)]
#[clap(
    version = "0.1",
    author = "packtracer developers",
    about = "Packet raytracer built on a SAH bounding volume hierarchy"
)]
pub struct Options {
    #[clap(
        short,
        long,
        default_value = "0",
        about = "Use specified number of threads for rendering, 0 picks one per core."
    )]
    pub threads: usize,
    #[clap(short, long, default_value = "512", about = "Output image width in pixels.")]
    pub width: usize,
    #[clap(short = 'H', long, default_value = "512", about = "Output image height in pixels.")]
    pub height: usize,
    #[clap(
        short,
        long,
        about = "Trace one ray per pixel instead of coherent ray packets."
    )]
    pub no_packets: bool,
    #[clap(short, long, about = "Jittered 4x4 supersampling, pixel tracer only.")]
    pub antialias: bool,
    #[clap(
        short,
        long,
        about = "Wall clock budget in seconds for the pixel tracer; the render may return incomplete."
    )]
    pub max_time: Option<f64>,
    #[clap(
        short,
        long,
        default_value = "packtracer.ppm",
        about = "Image file used for rendering output."
    )]
    pub image_file: String,
    #[clap(short, long, about = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            threads: 0,
            width: 512,
            height: 512,
            no_packets: false,
            antialias: false,
            max_time: None,
            image_file: "".to_string(),
            quiet: false,
        }
    }
}
