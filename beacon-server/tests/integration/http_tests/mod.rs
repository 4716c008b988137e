mod test_websocket_on_root;
