mod adapter;
mod feed_engine;
