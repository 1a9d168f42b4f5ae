//! Feed-forward classifiers and their construction
//!
//! A [`ModelSpec`] is an explicit, validated list of layers. The
//! [`ModelFactory`] produces one for each hidden width of a sweep and
//! materializes it as a freshly initialized [`Mlp`].

mod factory;
mod init;
mod mlp;
mod spec;

pub use factory::ModelFactory;
pub use init::he_uniform;
pub use mlp::{argmax_rows, Gradients, Layer, Linear, LinearGrad, Mlp};
pub use spec::{LayerSpec, ModelSpec};
