// Public HTTP surface

pub mod service;
