mod normalizer;
mod renderer;
