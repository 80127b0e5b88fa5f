mod tracker_flow;
