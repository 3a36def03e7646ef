mod ordered_store;
