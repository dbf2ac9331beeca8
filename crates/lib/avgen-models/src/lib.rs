pub mod attack;
pub mod dist;
pub mod kinematics;
pub mod net;
pub mod sensor;
